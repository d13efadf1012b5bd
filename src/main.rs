use anyhow::Context;
use clap::Parser;
use request_totals::domain::ports::Storage;
use request_totals::utils::{logger, validation::Validate};
use request_totals::{
    render, CliArgs, InMemoryCatalog, JsonRequestSource, LocalStorage, TomlConfig, TotalsEngine,
    TotalsError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting request-totals");
    if let Some(path) = &args.config {
        tracing::info!("📁 Loading configuration from: {}", path);
    }

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if args.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    match run(&config).await {
        Ok(Some(path)) => {
            tracing::info!("✅ Totals written to: {}", path);
        }
        Ok(None) => {
            tracing::info!("✅ Totals calculated");
        }
        Err(e) => {
            if let Some(totals_error) = e.downcast_ref::<TotalsError>() {
                tracing::error!("❌ Calculation failed: {}", totals_error);
                exit_with(totals_error);
            }
            return Err(e);
        }
    }

    Ok(())
}

async fn run(config: &TomlConfig) -> anyhow::Result<Option<String>> {
    let storage = LocalStorage::new(config.input.base_path.clone());

    let catalog_path = config.catalog_path()?;
    let catalog = InMemoryCatalog::load(&storage, catalog_path).await?;

    let source = JsonRequestSource::new(storage.clone(), config.requests_path()?);
    let engine = TotalsEngine::new(source, catalog, config.totals_options());
    let summary = engine.run().await?;

    let rendered = render(&summary, config.output.format)?;
    match &config.output.path {
        Some(path) => {
            storage
                .write_file(path, rendered.as_bytes())
                .await
                .with_context(|| format!("writing {} output", config.output.format))?;
            Ok(Some(path.clone()))
        }
        None => {
            println!("{}", rendered);
            Ok(None)
        }
    }
}

fn exit_with(e: &TotalsError) -> ! {
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}
