//! Prometheus scrape endpoint
//!
//! One GET route that gathers a [`Registry`] and renders it in the text
//! exposition format. Every scrape gathers afresh, so each request triggers
//! one `collect` per registered collector.

use std::future::Future;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use poolstat_domain::{PoolStatError, Result};
use prometheus::{Encoder, Registry, TextEncoder};
use tokio::net::TcpListener;
use tracing::{error, info, trace};

/// Router serving `registry` at `path`.
pub fn metrics_router(registry: Registry, path: &str) -> Router {
    Router::new().route(path, get(metrics_handler)).with_state(registry)
}

/// Gather `registry` and encode it as exposition text.
///
/// # Errors
/// Returns `PoolStatError::Export` if the encoder rejects the gathered
/// families.
pub fn render_metrics(registry: &Registry) -> Result<String> {
    let families = registry.gather();
    let encoder = TextEncoder::new();

    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|e| PoolStatError::Export(e.to_string()))?;

    trace!(families = families.len(), bytes = buffer.len(), "Rendered metrics");
    String::from_utf8(buffer)
        .map_err(|e| PoolStatError::Export(e.to_string()))
}

async fn metrics_handler(State(registry): State<Registry>) -> Response {
    match render_metrics(&registry) {
        Ok(body) => {
            let content_type = TextEncoder::new().format_type().to_string();
            ([(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("# {}\n", e)).into_response()
        }
    }
}

/// Serve `router` on `listener` until the server fails.
///
/// # Errors
/// Returns `PoolStatError::Io` if the server stops with an I/O error.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    log_listening(&listener);
    axum::serve(listener, router).await.map_err(PoolStatError::from)
}

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// # Errors
/// Returns `PoolStatError::Io` if the server stops with an I/O error.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    log_listening(&listener);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(PoolStatError::from)
}

fn log_listening(listener: &TcpListener) {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}", addr);
    }
}
