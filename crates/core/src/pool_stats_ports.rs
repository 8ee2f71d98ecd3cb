//! Pool statistics port.
//!
//! The collector never owns or manages a pool. It only needs a way to ask
//! for the current [`PoolStat`] snapshot, which any pool adapter provides by
//! implementing [`PoolStatsPort`].

use std::sync::Arc;

use poolstat_domain::PoolStat;

/// Source of point-in-time pool statistics.
///
/// `stat` is called once per scrape, possibly from several scrape handlers
/// at the same time and concurrently with normal pool use. Implementations
/// must return a self-consistent snapshot without blocking for long. A
/// closed pool still returns a snapshot (zeroed or frozen values).
pub trait PoolStatsPort: Send + Sync {
    /// Take a snapshot of the pool's counters.
    fn stat(&self) -> PoolStat;
}

impl<T: PoolStatsPort + ?Sized> PoolStatsPort for Arc<T> {
    fn stat(&self) -> PoolStat {
        (**self).stat()
    }
}

impl<T: PoolStatsPort + ?Sized> PoolStatsPort for &T {
    fn stat(&self) -> PoolStat {
        (**self).stat()
    }
}
