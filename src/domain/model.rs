use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type ItemId = u64;
pub type RequestId = u64;

/// A catalog entry. Soft-deleted items keep their record and carry `deleted_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub default_unit: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CatalogItem {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            default_unit: None,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Marks the item as removed without dropping it from the catalog.
    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }
}

/// One line of a request. `request_unit` is `None` when the quantity is in the
/// item's default unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLine {
    pub item_id: ItemId,
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: u64,
    #[serde(
        default,
        alias = "packaging_unit",
        deserialize_with = "deserialize_unit",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_unit: Option<String>,
}

impl RequestLine {
    pub fn new(item_id: ItemId, quantity: u64) -> Self {
        Self {
            item_id,
            quantity,
            request_unit: None,
        }
    }

    pub fn with_unit(item_id: ItemId, quantity: u64, unit: impl Into<String>) -> Self {
        Self {
            item_id,
            quantity,
            request_unit: normalize_unit(unit.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    #[serde(default, deserialize_with = "deserialize_lines")]
    pub request_items: Vec<RequestLine>,
}

impl Request {
    pub fn new(id: RequestId, request_items: Vec<RequestLine>) -> Self {
        Self { id, request_items }
    }
}

fn normalize_unit(unit: String) -> Option<String> {
    let trimmed = unit.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn deserialize_unit<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let unit = Option::<String>::deserialize(deserializer)?;
    Ok(unit.and_then(normalize_unit))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawQuantity::deserialize(deserializer)? {
        RawQuantity::Unsigned(value) => Ok(value),
        RawQuantity::Signed(value) => Err(de::Error::custom(format!(
            "quantity must not be negative, got {}",
            value
        ))),
        RawQuantity::Float(value) => {
            if value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
                Ok(value as u64)
            } else {
                Err(de::Error::custom(format!(
                    "quantity must be a whole non-negative number, got {}",
                    value
                )))
            }
        }
        RawQuantity::Text(text) => text.trim().parse::<u64>().map_err(|_| {
            de::Error::custom(format!("quantity is not a non-negative integer: {:?}", text))
        }),
    }
}

// Older request records store an empty object instead of an empty list.
fn deserialize_lines<'de, D>(deserializer: D) -> Result<Vec<RequestLine>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(Vec::new()),
        Some(lines @ serde_json::Value::Array(_)) => {
            Vec::<RequestLine>::deserialize(lines).map_err(de::Error::custom)
        }
        Some(_) => Err(de::Error::custom(
            "request_items must be a list of line items",
        )),
    }
}

/// Quantity totals keyed by bucket, iterated in the order keys were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` to `key`, appending the key if it has not been seen.
    /// Returns `None` if the total would overflow; the summary is unchanged then.
    pub fn add(&mut self, key: &str, quantity: u64) -> Option<u64> {
        match self.index.get(key) {
            Some(&position) => {
                let total = &mut self.entries[position].1;
                *total = total.checked_add(quantity)?;
                Some(*total)
            }
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), quantity));
                Some(quantity)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, total)| (key.as_str(), *total))
    }

    pub fn first(&self) -> Option<(&str, u64)> {
        self.entries.first().map(|(key, total)| (key.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Summary {
    type Item = (String, u64);
    type IntoIter = std::vec::IntoIter<(String, u64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Summary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, total) in &self.entries {
            map.serialize_entry(key, total)?;
        }
        map.end()
    }
}
