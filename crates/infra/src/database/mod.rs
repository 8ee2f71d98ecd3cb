//! Database pool adapters
//!
//! r2d2 pools wrapped so they can report [`PoolStat`](poolstat_domain::PoolStat)
//! snapshots through [`PoolStatsPort`](poolstat_core::PoolStatsPort).

mod acquire_metrics;
mod instrumented_pool;

pub use acquire_metrics::{AcquireCounters, AcquireMetrics};
pub use instrumented_pool::InstrumentedPool;
