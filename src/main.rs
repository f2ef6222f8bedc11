//! semantic-query - text similarity search service
//!
//! Usage: `semantic-query [CONFIG]`. Without an argument the configuration
//! path is taken from `SEMANTIC_QUERY_CONFIG`, then the platform config
//! directory.

use anyhow::Context;
use semantic_query::core::{resolve_config_path, AppConfig, CONFIG_ENV_VAR};
use semantic_query::logging::{init_fallback_logging, LoggingSystem};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = resolve_config_path(
        std::env::args().nth(1),
        std::env::var(CONFIG_ENV_VAR).ok(),
    );
    let config_found = config_path.exists();
    let config = AppConfig::load_or_default(&config_path)
        .await
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;

    // Keep the logging system alive so the file writer keeps flushing
    let _logging_system = match LoggingSystem::init(config.logging.clone()) {
        Ok(system) => Some(system),
        Err(e) => {
            eprintln!("Failed to initialize logging system: {}. Using basic logging.", e);
            init_fallback_logging();
            None
        }
    };

    if config_found {
        tracing::info!("Loaded configuration from {:?}", config_path);
    } else {
        tracing::warn!("No configuration at {:?}, running with defaults", config_path);
    }

    semantic_query::core::run(&config)
        .await
        .context("Query service failed")?;

    Ok(())
}
