//! Domain constants
//!
//! Centralized location for the fixed values shared across crates.

/// Subsystem token placed between the namespace and every metric suffix.
pub const SUBSYSTEM: &str = "pgx";

/// Number of metrics published per collection cycle.
pub const METRIC_COUNT: usize = 9;

// Exporter defaults
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:9187";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Pool defaults
pub const DEFAULT_POOL_SIZE: u32 = 10;
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 5;
