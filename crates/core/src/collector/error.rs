//! Collector error types

use poolstat_domain::PoolStatError;
use thiserror::Error;

/// Errors raised while building or registering a collector
///
/// Collection itself cannot fail: every extractor is a total function over
/// a snapshot.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The namespace produced a name the metrics client rejects
    #[error("Invalid metric name '{name}': {source}")]
    InvalidMetricName {
        /// Fully-qualified name that failed validation
        name: String,
        /// Validation error from the metrics client
        #[source]
        source: prometheus::Error,
    },

    /// The registry refused the collector, usually a duplicate name
    #[error("Failed to register collector: {0}")]
    Registration(#[source] prometheus::Error),
}

/// Collector result type
pub type CollectorResult<T> = Result<T, CollectorError>;

impl CollectorError {
    /// Whether the registry rejected the collector because its metric names
    /// are already registered.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Registration(prometheus::Error::AlreadyReg))
    }
}

impl From<CollectorError> for PoolStatError {
    fn from(err: CollectorError) -> Self {
        match err {
            CollectorError::InvalidMetricName { name, source } => {
                Self::InvalidMetricName { name, reason: source.to_string() }
            }
            CollectorError::Registration(source) => Self::Registration(source.to_string()),
        }
    }
}
