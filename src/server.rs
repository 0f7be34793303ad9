//! HTTP server exposing the scraped metrics.

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::coordinator::ScrapeCoordinator;
use crate::exposition::{PrometheusSink, TEXT_CONTENT_TYPE};
use crate::model::MetricMapper;

const LANDING_PAGE: &str = r#"<html>
<head><title>Fujitsu RX300 Exporter</title></head>
<body>
<h1>Fujitsu RX300 Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
</body>
</html>"#;

/// Shared state for the request handlers.
pub struct AppState {
    pub coordinator: ScrapeCoordinator,
    pub mapper: Arc<MetricMapper>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(landing_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Serves until `shutdown` resolves, then lets in-flight pulls finish.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Exporter listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Handler for `/metrics`: one full scrape per pull.
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut sink = match PrometheusSink::new(&state.mapper) {
        Ok(sink) => sink,
        Err(e) => return export_failure(e),
    };
    state.coordinator.scrape_into(&mut sink).await;

    match sink.encode() {
        Ok(output) => (StatusCode::OK, [(CONTENT_TYPE, TEXT_CONTENT_TYPE)], output).into_response(),
        Err(e) => export_failure(e),
    }
}

fn export_failure(err: impl std::fmt::Display) -> Response {
    tracing::error!(error = %err, "Failed to render metrics");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to encode metrics: {}", err),
    )
        .into_response()
}

async fn landing_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
