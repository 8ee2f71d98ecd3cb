//! Connection pool statistics snapshot
//!
//! A [`PoolStat`] is produced by a pool on demand and describes the pool at
//! one instant. Consumers read it and throw it away; nothing in the workspace
//! mutates a snapshot after the pool hands it out.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* Pool Statistics */
/* -------------------------------------------------------------------------- */

/// Point-in-time readout of a connection pool's internal counters
///
/// Cumulative fields (`*_count`, `acquire_duration`) only grow for the
/// lifetime of a pool. Connection fields describe the current state.
///
/// `total_conns` is whatever the pool reports. It is normally
/// `constructing_conns + acquired_conns + idle_conns`, but it is stored as
/// its own field so that a pool mid-transition can report its own view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStat {
    /// Cumulative count of successful acquires
    pub acquire_count: u64,

    /// Total time spent across all successful acquires
    pub acquire_duration: Duration,

    /// Connections currently checked out
    pub acquired_conns: u32,

    /// Cumulative count of acquires canceled before completing
    pub canceled_acquire_count: u64,

    /// Connections currently being established
    pub constructing_conns: u32,

    /// Cumulative count of successful acquires that had to wait because no
    /// idle connection was available
    pub empty_acquire_count: u64,

    /// Connections currently idle
    pub idle_conns: u32,

    /// Configured maximum pool size
    pub max_conns: u32,

    /// Total connections in the pool, as reported by the pool
    pub total_conns: u32,
}
