use crate::app::render::OutputFormat;
use crate::core::totals::{MissingItemPolicy, TotalsOptions};
use crate::utils::error::{Result, TotalsError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub features: FeaturesConfig,
    pub aggregation: AggregationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Alternate packaging units ("packs"). Unset means off.
    pub enable_packs: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub on_missing_item: MissingItemPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub base_path: String,
    pub requests: Option<String>,
    pub catalog: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            base_path: ".".to_string(),
            requests: None,
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Written under `input.base_path`; stdout when unset.
    pub path: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TotalsError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TotalsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TotalsError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn alternate_units_enabled(&self) -> bool {
        self.features.enable_packs.unwrap_or(false)
    }

    pub fn totals_options(&self) -> TotalsOptions {
        TotalsOptions {
            alternate_units_enabled: self.alternate_units_enabled(),
            on_missing_item: self.aggregation.on_missing_item,
        }
    }

    pub fn requests_path(&self) -> Result<&str> {
        validation::validate_required_field("input.requests", &self.input.requests).map(String::as_str)
    }

    pub fn catalog_path(&self) -> Result<&str> {
        validation::validate_required_field("input.catalog", &self.input.catalog).map(String::as_str)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input.base_path", &self.input.base_path)?;

        let requests = self.requests_path()?;
        validation::validate_path("input.requests", requests)?;
        validation::validate_file_extension("input.requests", requests, &["json"])?;

        let catalog = self.catalog_path()?;
        validation::validate_path("input.catalog", catalog)?;
        validation::validate_file_extension("input.catalog", catalog, &["json"])?;

        if let Some(path) = &self.output.path {
            validation::validate_non_empty_string("output.path", path)?;
            validation::validate_path("output.path", path)?;
        }

        Ok(())
    }
}
