//! # PoolStat Core
//!
//! Translates connection pool statistics snapshots into Prometheus metrics.
//!
//! This crate contains:
//! - The upstream port a pool implements ([`PoolStatsPort`])
//! - The fixed metric catalogue ([`StatField`], [`MetricDefinition`])
//! - The collector that replays the catalogue on every scrape
//!   ([`PoolStatsCollector`])
//!
//! ## Architecture Principles
//! - Only depends on `poolstat-domain` and the metrics client
//! - No pool implementation, no HTTP
//! - Construction is pure; registration is a separate, explicit step
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use poolstat_core::{PoolStatsCollector, PoolStatsPort};
//! use poolstat_domain::PoolStat;
//! use prometheus::Registry;
//!
//! struct IdlePool;
//!
//! impl PoolStatsPort for IdlePool {
//!     fn stat(&self) -> PoolStat {
//!         PoolStat { idle_conns: 4, total_conns: 4, max_conns: 8, ..PoolStat::default() }
//!     }
//! }
//!
//! let registry = Registry::new();
//! let collector = PoolStatsCollector::new("app", Arc::new(IdlePool)).unwrap();
//! collector.register(&registry).unwrap();
//! assert_eq!(registry.gather().len(), 9);
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod collector;
pub mod pool_stats_ports;

pub use collector::{
    build_catalogue, register_pool_collector, CollectorError, CollectorResult, MetricDefinition,
    MetricSample, PoolStatsCollector, StatField,
};
pub use pool_stats_ports::PoolStatsPort;
