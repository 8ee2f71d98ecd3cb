//! Domain types and models

pub mod stats;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use stats::PoolStat;

/// How a published metric behaves over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Monotonically non-decreasing cumulative value
    Counter,
    /// Point-in-time value that can rise or fall
    Gauge,
}

impl ValueKind {
    /// Lowercase name as used in the exposition format `# TYPE` line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Gauge => "gauge",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
