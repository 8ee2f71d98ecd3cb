//! # PoolStat Infrastructure
//!
//! Infrastructure implementations of core ports and the exporter plumbing.
//!
//! This crate contains:
//! - The r2d2 pool adapter that produces [`PoolStat`](poolstat_domain::PoolStat)
//!   snapshots
//! - Configuration loading from the environment and from files
//! - Tracing subscriber setup
//! - The HTTP scrape endpoint
//!
//! ## Architecture
//! - Implements traits defined in `poolstat-core`
//! - Contains all "impure" code (I/O, sockets, global subscriber)

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod database;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use database::{AcquireMetrics, InstrumentedPool};
pub use http::{metrics_router, render_metrics, serve};
pub use observability::init_tracing;
