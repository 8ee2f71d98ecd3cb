//! Configuration structures
//!
//! Plain serde-deserializable settings for the exporter. Loading from the
//! environment or from disk lives in `poolstat-infra`; this module only
//! defines the shapes, their defaults, and validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONNECTION_TIMEOUT_SECS, DEFAULT_LISTEN_ADDR, DEFAULT_LOG_FILTER,
    DEFAULT_METRICS_PATH, DEFAULT_POOL_SIZE,
};
use crate::errors::{PoolStatError, Result};

/// Valid metric-name fragment. An empty namespace is allowed separately.
static NAMESPACE_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*$").ok());

/// Top-level exporter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Metric name prefix; empty means no prefix
    pub namespace: String,

    /// Socket address the scrape endpoint binds to
    pub listen_addr: String,

    /// HTTP path serving the exposition text
    pub metrics_path: String,

    /// Logging settings
    pub log: LogConfig,

    /// Database pool settings
    pub database: DatabaseConfig,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            metrics_path: DEFAULT_METRICS_PATH.to_string(),
            log: LogConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl ExporterConfig {
    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `PoolStatError::Config` if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        validate_namespace(&self.namespace)?;

        if self.listen_addr.trim().is_empty() {
            return Err(PoolStatError::Config("listen_addr cannot be empty".to_string()));
        }
        if !self.metrics_path.starts_with('/') {
            return Err(PoolStatError::Config(format!(
                "metrics_path must start with '/': {}",
                self.metrics_path
            )));
        }

        self.database.validate()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = PoolStatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(PoolStatError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `poolstat_core=debug`
    pub filter: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_LOG_FILTER.to_string(), format: LogFormat::default() }
    }
}

/// Database pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file path
    pub path: String,

    /// Connection pool size (default: 10)
    pub pool_size: u32,

    /// Connection timeout in seconds (default: 5)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            pool_size: DEFAULT_POOL_SIZE,
            connection_timeout_secs: DEFAULT_CONNECTION_TIMEOUT_SECS,
        }
    }
}

impl DatabaseConfig {
    /// Validate the pool settings
    ///
    /// # Errors
    /// Returns `PoolStatError::Config` if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(PoolStatError::Config("database path cannot be empty".to_string()));
        }
        if self.pool_size == 0 {
            return Err(PoolStatError::Config("pool_size must be greater than 0".to_string()));
        }
        if self.connection_timeout_secs == 0 {
            return Err(PoolStatError::Config(
                "connection_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Check that `namespace` can prefix a metric name.
///
/// # Errors
/// Returns `PoolStatError::Config` for characters outside
/// `[a-zA-Z0-9_:]` or a leading digit.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        return Ok(());
    }

    let re = NAMESPACE_RE
        .as_ref()
        .ok_or_else(|| PoolStatError::Config("namespace pattern failed to compile".to_string()))?;

    if re.is_match(namespace) {
        Ok(())
    } else {
        Err(PoolStatError::Config(format!("Invalid metric namespace: {:?}", namespace)))
    }
}
