use crate::domain::model::{CatalogItem, ItemId};
use crate::domain::ports::{CatalogLookup, Storage};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Catalog held in memory, keyed by item id. Soft-deleted items are kept.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: HashMap<ItemId, CatalogItem>,
}

impl InMemoryCatalog {
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    /// Parses a JSON array of catalog items.
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let items: Vec<CatalogItem> = serde_json::from_slice(data)?;
        Ok(Self::new(items))
    }

    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = storage.read_file(path).await?;
        let catalog = Self::from_json_slice(&data)?;
        tracing::info!(
            "Loaded {} catalog items ({} deleted) from {}",
            catalog.len(),
            catalog.items.values().filter(|item| item.is_deleted()).count(),
            path
        );
        Ok(catalog)
    }

    pub fn insert(&mut self, item: CatalogItem) {
        self.items.insert(item.id, item);
    }

    /// Returns false if the id is unknown.
    pub fn soft_delete(&mut self, id: ItemId, at: DateTime<Utc>) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.soft_delete(at);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn find_live(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.get(&id).filter(|item| !item.is_deleted())
    }

    fn find_with_deleted(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.get(&id)
    }
}
