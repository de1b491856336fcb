//! Startup configuration and logging setup

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use otp_shared::config::{AppConfig, Environment, LoggingConfig};

/// Load and validate the application configuration
///
/// The `.env` file is read everywhere except production, where the
/// platform injects the environment.
pub fn load_config() -> Result<AppConfig> {
    if Environment::from_env().loads_dotenv() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env();
    config
        .validate()
        .map_err(|problems| anyhow!("Invalid configuration: {}", problems.join("; ")))?;

    Ok(config)
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location)
        .init();
}
