use crate::domain::model::{ItemId, RequestId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TotalsError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Item {item_id} referenced by request {request_id} was not found in the catalog")]
    ItemNotFound { request_id: RequestId, item_id: ItemId },

    #[error("Quantity total overflowed for '{bucket}'")]
    QuantityOverflow { bucket: String },
}

impl TotalsError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            TotalsError::IoError(e) => format!("Could not read or write a file: {}", e),
            TotalsError::SerializationError(e) => format!("Input data is not valid JSON: {}", e),
            TotalsError::CsvError(e) => format!("Could not produce CSV output: {}", e),
            TotalsError::ConfigError { .. }
            | TotalsError::ConfigValidationError { .. }
            | TotalsError::InvalidConfigValueError { .. }
            | TotalsError::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            TotalsError::ItemNotFound { .. } => format!("Unknown item: {}", self),
            TotalsError::ProcessingError { .. } | TotalsError::QuantityOverflow { .. } => {
                self.to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TotalsError::IoError(_) => "Check that the input paths exist and are readable",
            TotalsError::SerializationError(_) => {
                "Check that requests and catalog files are JSON arrays with the expected fields"
            }
            TotalsError::CsvError(_) => "Try the json output format",
            TotalsError::ConfigError { .. }
            | TotalsError::ConfigValidationError { .. }
            | TotalsError::InvalidConfigValueError { .. }
            | TotalsError::MissingConfigError { .. } => "Review the TOML configuration and command line flags",
            TotalsError::ItemNotFound { .. } => {
                "Add the item to the catalog or run with on_missing_item = \"skip\""
            }
            TotalsError::ProcessingError { .. } => "Re-run with --verbose for details",
            TotalsError::QuantityOverflow { .. } => "Check the request data for corrupt quantities",
        }
    }
}

pub type Result<T> = std::result::Result<T, TotalsError>;
