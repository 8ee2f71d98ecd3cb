//! Exporter context - dependency wiring

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use poolstat_core::register_pool_collector;
use poolstat_domain::{ExporterConfig, PoolStatError, Result};
use poolstat_infra::http::serve_with_shutdown;
use poolstat_infra::{metrics_router, InstrumentedPool};
use prometheus::Registry;
use r2d2_sqlite::SqliteConnectionManager;
use tokio::net::TcpListener;
use tracing::info;

/// Instrumented SQLite connection pool
pub type SqlitePool = InstrumentedPool<SqliteConnectionManager>;

/// Exporter context - owns the pool, the registry, and the configuration
pub struct ExporterContext {
    pub config: ExporterConfig,
    pub pool: Arc<SqlitePool>,
    pub registry: Registry,
}

impl ExporterContext {
    /// Open the pool described by `config` and register its collector on a
    /// fresh registry.
    ///
    /// # Errors
    /// Returns `PoolStatError` if the configuration is invalid, the pool
    /// cannot be opened, or the collector cannot be registered.
    pub fn new(config: ExporterConfig) -> Result<Self> {
        config.validate()?;

        let manager = SqliteConnectionManager::file(&config.database.path);
        let pool = Arc::new(InstrumentedPool::build(manager, &config.database)?);

        let registry = Registry::new();
        register_pool_collector(&registry, &config.namespace, Arc::clone(&pool))?;

        info!(
            namespace = %config.namespace,
            db_path = %config.database.path,
            "Exporter context initialized"
        );
        Ok(Self { config, pool, registry })
    }

    /// Scrape endpoint for this context's registry.
    pub fn router(&self) -> Router {
        metrics_router(self.registry.clone(), &self.config.metrics_path)
    }

    /// Bind the configured listen address.
    ///
    /// # Errors
    /// Returns `PoolStatError::Io` if the address cannot be bound.
    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind(self.config.listen_addr.as_str()).await.map_err(|e| {
            PoolStatError::Io(format!("Failed to bind {}: {}", self.config.listen_addr, e))
        })
    }

    /// Bind and serve until `shutdown` resolves.
    ///
    /// # Errors
    /// Returns `PoolStatError::Io` if binding or serving fails.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        serve_with_shutdown(listener, self.router(), shutdown).await
    }
}

impl std::fmt::Debug for ExporterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExporterContext")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
