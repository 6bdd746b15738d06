//! Tracing setup for the todoctl CLI
//!
//! Usage:
//!   todoctl --debug serve              # Debug logging to console
//!   todoctl --log-json serve           # One JSON object per log line
//!   RUST_LOG=todoctl_server=debug ...  # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                           # Log filter (default: info)
//!   LOG_JSON                           # Same as --log-json

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets debug level if RUST_LOG is not set)
    pub debug: bool,
    /// Emit JSON lines instead of compact text
    pub json: bool,
}

fn env_filter(config: &TracingConfig) -> EnvFilter {
    let default_level = if config.debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize tracing with console output
pub fn init(config: &TracingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.debug);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    result.map_err(|err| anyhow!(err))
}
