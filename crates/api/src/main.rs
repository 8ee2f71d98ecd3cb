//! PoolStat - connection pool statistics exporter
//!
//! Main entry point for the `poolstat` binary.

use anyhow::Context;
use poolstat_app::ExporterContext;
use poolstat_infra::{config, init_tracing};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration; log the outcome once tracing is up
    let dotenv = dotenvy::dotenv();

    let config = config::load().context("failed to load configuration")?;
    init_tracing(&config.log).context("failed to initialize logging")?;

    match dotenv {
        Ok(path) => info!("Loaded .env from: {:?}", path),
        Err(e) => debug!("Could not load .env file: {}", e),
    }

    info!("PoolStat starting...");
    let ctx = ExporterContext::new(config).context("failed to initialize exporter")?;
    ctx.run(shutdown_signal()).await.context("scrape endpoint failed")?;

    info!("PoolStat stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
