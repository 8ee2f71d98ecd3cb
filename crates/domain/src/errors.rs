//! Error types used throughout the workspace

use thiserror::Error;

/// Main error type for PoolStat
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolStatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid metric name '{name}': {reason}")]
    InvalidMetricName { name: String, reason: String },

    #[error("Registration error: {0}")]
    Registration(String),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl PoolStatError {
    /// Whether the error comes from bad configuration rather than a runtime
    /// failure. Configuration errors are fatal at startup.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::InvalidMetricName { .. })
    }
}

impl From<std::io::Error> for PoolStatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for PoolStat operations
pub type Result<T> = std::result::Result<T, PoolStatError>;
