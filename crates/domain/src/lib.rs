//! # PoolStat Domain
//!
//! Domain types shared by every PoolStat crate.
//!
//! This crate contains:
//! - The point-in-time pool statistics snapshot ([`PoolStat`])
//! - Metric value kinds
//! - Configuration structures
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other PoolStat crates
//! - No I/O, no metrics client, no pool implementation
//! - Pure data structures and validation

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
