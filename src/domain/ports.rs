use crate::domain::model::{CatalogItem, ItemId, Request};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Item lookup with two explicit scopes. Totals must use `find_with_deleted`
/// so that requests for since-removed items still resolve to a name.
pub trait CatalogLookup: Send + Sync {
    /// Live items only.
    fn find_live(&self, id: ItemId) -> Option<&CatalogItem>;
    /// Live and soft-deleted items.
    fn find_with_deleted(&self, id: ItemId) -> Option<&CatalogItem>;
}

#[async_trait]
pub trait RequestSource: Send + Sync {
    async fn load_requests(&self) -> Result<Vec<Request>>;
}
