//! Logging setup
//!
//! Installs the global `tracing` subscriber for the exporter binary.
//! Library code only emits events through `tracing` macros; nothing is
//! printed until a subscriber is installed here.

use poolstat_domain::{LogConfig, LogFormat, PoolStatError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber described by `config`.
///
/// `RUST_LOG`, when set and valid, overrides `config.filter`.
///
/// # Errors
/// Returns `PoolStatError::Config` if the filter does not parse or a
/// global subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| {
        PoolStatError::Config(format!("Failed to install tracing subscriber: {}", e))
    })
}

fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(&config.filter),
    }
}

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| PoolStatError::Config(format!("Invalid log filter '{}': {}", directives, e)))
}
