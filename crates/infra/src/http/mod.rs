//! HTTP scrape endpoint

mod metrics_server;

pub use metrics_server::{metrics_router, render_metrics, serve, serve_with_shutdown};
