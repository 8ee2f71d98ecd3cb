//! Instrumented r2d2 pool
//!
//! Wraps an r2d2 [`Pool`] and records every acquisition made through
//! [`InstrumentedPool::get`]. Snapshots combine those counters with the
//! pool's own connection state.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use poolstat_core::PoolStatsPort;
use poolstat_domain::{DatabaseConfig, PoolStat, PoolStatError, Result};
use r2d2::{ManageConnection, Pool, PooledConnection};
use tracing::{debug, info, instrument, warn};

use super::acquire_metrics::AcquireMetrics;

/// r2d2 pool that counts its acquisitions
///
/// Only acquisitions made through this wrapper are counted. Connections
/// taken from the inner pool directly still show up in the gauges.
pub struct InstrumentedPool<M: ManageConnection> {
    pool: Pool<M>,
    metrics: Arc<AcquireMetrics>,
}

impl<M: ManageConnection> InstrumentedPool<M> {
    /// Wrap an existing pool. Counters start at zero.
    pub fn new(pool: Pool<M>) -> Self {
        Self { pool, metrics: Arc::new(AcquireMetrics::new()) }
    }

    /// Build an r2d2 pool for `manager` sized by `config` and wrap it.
    ///
    /// # Errors
    /// Returns `PoolStatError::Pool` if r2d2 cannot open the initial
    /// connections within the configured timeout.
    #[instrument(skip(manager), fields(pool_size = config.pool_size))]
    pub fn build(manager: M, config: &DatabaseConfig) -> Result<Self> {
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
            .build(manager)
            .map_err(|e| {
                warn!("Failed to create connection pool: {}", e);
                PoolStatError::Pool(format!("Failed to create pool: {}", e))
            })?;

        info!("Connection pool created with {} connections", config.pool_size);
        Ok(Self::new(pool))
    }

    /// Acquire a connection, waiting up to the pool's connection timeout.
    ///
    /// The acquisition counts as empty when the pool had no idle connection
    /// at entry. This is a check before the checkout, not part of it: under
    /// contention another caller can take the idle connection in between
    /// (a wait not counted as empty), or release one (an instant acquire
    /// counted as empty).
    ///
    /// # Errors
    /// Returns `PoolStatError::Pool` if no connection became available in
    /// time. The attempt is counted as canceled.
    pub fn get(&self) -> Result<PooledConnection<M>> {
        self.acquire(|pool| pool.get())
    }

    /// Acquire a connection, waiting at most `timeout`.
    ///
    /// # Errors
    /// Same as [`get`](Self::get).
    pub fn get_timeout(&self, timeout: Duration) -> Result<PooledConnection<M>> {
        self.acquire(|pool| pool.get_timeout(timeout))
    }

    fn acquire<F>(&self, checkout: F) -> Result<PooledConnection<M>>
    where
        F: FnOnce(&Pool<M>) -> std::result::Result<PooledConnection<M>, r2d2::Error>,
    {
        let was_empty = self.pool.state().idle_connections == 0;
        let start = Instant::now();

        match checkout(&self.pool) {
            Ok(conn) => {
                let waited = start.elapsed();
                self.metrics.record_acquired(waited, was_empty);
                debug!(waited = ?waited, was_empty, "Connection acquired");
                Ok(conn)
            }
            Err(e) => {
                self.metrics.record_canceled();
                warn!("Failed to get connection after {:?}: {}", start.elapsed(), e);
                Err(PoolStatError::Pool(format!("Failed to get connection: {}", e)))
            }
        }
    }

    /// The wrapped r2d2 pool
    pub fn inner(&self) -> &Pool<M> {
        &self.pool
    }

    pub fn metrics(&self) -> &Arc<AcquireMetrics> {
        &self.metrics
    }
}

impl<M: ManageConnection> PoolStatsPort for InstrumentedPool<M> {
    /// r2d2 tracks connections that are still being opened in a private
    /// counter that `State` does not expose. They appear in no field:
    /// `constructing_conns` is always zero and `total_conns` leaves them
    /// out.
    ///
    /// The acquisition counters are read in one step and are consistent
    /// with each other. The connection gauges come from a separate r2d2
    /// `State` read.
    fn stat(&self) -> PoolStat {
        let state = self.pool.state();
        let counters = self.metrics.snapshot();

        PoolStat {
            acquire_count: counters.acquire_count,
            acquire_duration: counters.acquire_duration,
            acquired_conns: state.connections.saturating_sub(state.idle_connections),
            canceled_acquire_count: counters.canceled_acquire_count,
            constructing_conns: 0,
            empty_acquire_count: counters.empty_acquire_count,
            idle_conns: state.idle_connections,
            max_conns: self.pool.max_size(),
            total_conns: state.connections,
        }
    }
}

impl<M: ManageConnection> fmt::Debug for InstrumentedPool<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.pool.state();
        f.debug_struct("InstrumentedPool")
            .field("max_size", &self.pool.max_size())
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .field("metrics", &self.metrics)
            .finish()
    }
}
