pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::TomlConfig;

pub use adapters::{catalog::InMemoryCatalog, json_source::JsonRequestSource, storage::LocalStorage};
pub use app::render::{render, OutputFormat};
pub use core::{
    engine::TotalsEngine,
    totals::{MissingItemPolicy, RequestTotalsService, TotalsOptions},
};
pub use domain::model::{CatalogItem, Request, RequestLine, Summary};
pub use utils::error::{Result, TotalsError};
