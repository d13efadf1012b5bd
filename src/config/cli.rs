use crate::app::render::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::core::totals::MissingItemPolicy;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "request-totals")]
#[command(about = "Total requested quantities per catalog item")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Requests JSON file, relative to the base path
    #[arg(long)]
    pub requests: Option<String>,

    /// Catalog items JSON file, relative to the base path
    #[arg(long)]
    pub catalog: Option<String>,

    /// Directory input and output paths are resolved against
    #[arg(long)]
    pub base_path: Option<String>,

    /// Override the packs feature flag from config
    #[arg(long)]
    pub enable_packs: Option<bool>,

    /// skip or fail when a line references an unknown item
    #[arg(long)]
    pub on_missing_item: Option<MissingItemPolicy>,

    /// json or csv
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Write the summary to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl CliArgs {
    /// Loads the config file if one was given, then applies command line overrides.
    pub fn resolve_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(requests) = &self.requests {
            config.input.requests = Some(requests.clone());
        }
        if let Some(catalog) = &self.catalog {
            config.input.catalog = Some(catalog.clone());
        }
        if let Some(base_path) = &self.base_path {
            config.input.base_path = base_path.clone();
        }
        if let Some(enable_packs) = self.enable_packs {
            config.features.enable_packs = Some(enable_packs);
            tracing::info!("🔧 Packs overridden to: {}", enable_packs);
        }
        if let Some(policy) = self.on_missing_item {
            config.aggregation.on_missing_item = policy;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
    }
}
