//! # PoolStat App
//!
//! Application layer for the `poolstat` exporter binary.
//!
//! This crate contains:
//! - The exporter context (dependency wiring)
//! - The `poolstat` entry point
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Owns the SQLite pool, the registry, and the scrape endpoint

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod context;

pub use context::*;
