use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::ai::StudyAssistant;
use crate::config::Config;
use crate::db::DbPool;
use crate::metrics::StudyMetrics;
use crate::storage::Storage;

pub mod handlers;
pub mod router;
pub mod validators;

pub struct AppState {
    pub db: DbPool,
    pub storage: Storage,
    pub assistant: StudyAssistant,
    pub metrics: Arc<StudyMetrics>,
    pub max_upload_bytes: usize,
}

pub async fn serve(
    cfg: Config,
    db: DbPool,
    storage: Storage,
    assistant: StudyAssistant,
    metrics: Arc<StudyMetrics>,
) -> Result<()> {
    let bind_addr = format!("{}:{}", cfg.api.bind, cfg.api.port);
    let state = Arc::new(AppState {
        db,
        storage,
        assistant,
        metrics,
        max_upload_bytes: cfg.api.max_upload_bytes,
    });
    let cors = build_cors_layer(&cfg.api.cors_allowed_origins);
    let app = build_app(state, cors, &cfg.storage.media_url);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("No valid CORS origins configured; CORS will block all cross-origin requests");
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: Arc<AppState>, cors: CorsLayer, media_url: &str) -> Router {
    // Multipart framing needs a little headroom over the file itself.
    let body_limit = state.max_upload_bytes.saturating_add(64 * 1024);
    Router::new()
        .merge(router::routes(state, media_url))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
