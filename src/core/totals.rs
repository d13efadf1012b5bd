use crate::core::pluralize::pluralize;
use crate::domain::model::{ItemId, Request, RequestLine, Summary};
use crate::domain::ports::CatalogLookup;
use crate::utils::error::{Result, TotalsError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// What to do with a line whose item id matches no catalog record, live or deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingItemPolicy {
    /// Drop the line with a warning and keep totalling the rest.
    #[default]
    Skip,
    /// Abort the whole calculation with `TotalsError::ItemNotFound`.
    Fail,
}

impl std::str::FromStr for MissingItemPolicy {
    type Err = TotalsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(TotalsError::InvalidConfigValueError {
                field: "on_missing_item".to_string(),
                value: other.to_string(),
                reason: "Expected one of: skip, fail".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalsOptions {
    /// Track alternate packaging units in their own buckets.
    pub alternate_units_enabled: bool,
    pub on_missing_item: MissingItemPolicy,
}

/// Summary key for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketKey<'a> {
    Item(&'a str),
    Packaged { name: &'a str, unit: &'a str },
}

impl<'a> BucketKey<'a> {
    pub fn for_line(name: &'a str, line: &'a RequestLine, alternate_units_enabled: bool) -> Self {
        match line.request_unit.as_deref().map(str::trim) {
            Some(unit) if alternate_units_enabled && !unit.is_empty() => {
                BucketKey::Packaged { name, unit }
            }
            _ => BucketKey::Item(name),
        }
    }
}

impl fmt::Display for BucketKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Item(name) => f.write_str(name),
            BucketKey::Packaged { name, unit } => write!(f, "{} - {}", name, pluralize(unit)),
        }
    }
}

pub struct RequestTotalsService<'c, C: CatalogLookup + ?Sized> {
    catalog: &'c C,
    options: TotalsOptions,
}

impl<'c, C: CatalogLookup + ?Sized> RequestTotalsService<'c, C> {
    pub fn new(catalog: &'c C, options: TotalsOptions) -> Self {
        Self { catalog, options }
    }

    /// Totals requested quantities per bucket, in first-seen order.
    pub fn calculate<'r, I>(&self, requests: I) -> Result<Summary>
    where
        I: IntoIterator<Item = &'r Request>,
    {
        let catalog: &'c C = self.catalog;
        let mut summary = Summary::new();
        let mut names: HashMap<ItemId, Option<&'c str>> = HashMap::new();
        let mut skipped = 0usize;

        for request in requests {
            for line in &request.request_items {
                let name = *names.entry(line.item_id).or_insert_with(|| {
                    catalog
                        .find_with_deleted(line.item_id)
                        .map(|item| item.name.as_str())
                });

                let Some(name) = name else {
                    match self.options.on_missing_item {
                        MissingItemPolicy::Skip => {
                            tracing::warn!(
                                request_id = request.id,
                                item_id = line.item_id,
                                "Skipping line for unknown item"
                            );
                            skipped += 1;
                            continue;
                        }
                        MissingItemPolicy::Fail => {
                            return Err(TotalsError::ItemNotFound {
                                request_id: request.id,
                                item_id: line.item_id,
                            });
                        }
                    }
                };

                let key = BucketKey::for_line(name, line, self.options.alternate_units_enabled)
                    .to_string();
                if summary.add(&key, line.quantity).is_none() {
                    return Err(TotalsError::QuantityOverflow { bucket: key });
                }
            }
        }

        tracing::debug!(
            buckets = summary.len(),
            skipped,
            alternate_units = self.options.alternate_units_enabled,
            "Calculated request totals"
        );

        Ok(summary)
    }
}
