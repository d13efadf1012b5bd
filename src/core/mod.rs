pub mod engine;
pub mod pluralize;
pub mod totals;

pub use crate::domain::model::{CatalogItem, Request, RequestLine, Summary};
pub use crate::domain::ports::{CatalogLookup, RequestSource, Storage};
pub use crate::utils::error::Result;
