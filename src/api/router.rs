use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;
use super::AppState;
use super::handlers;

pub fn routes(state: Arc<AppState>, media_url: &str) -> Router {
    let media = ServeDir::new(state.storage.root());
    let media_prefix = media_url.trim_end_matches('/');

    Router::new()
        // Health
        .route("/health", get(handlers::health::health_check))
        // Documents
        .route("/api/documents/", get(handlers::documents::list))
        .route("/api/documents/upload/", post(handlers::documents::upload))
        .route(
            "/api/documents/{id}/",
            get(handlers::documents::get).delete(handlers::documents::delete),
        )
        // AI actions
        .route("/api/documents/{id}/summarize/", post(handlers::summary::summarize))
        .route("/api/documents/{id}/quiz/", post(handlers::quiz::generate))
        .route("/api/documents/{id}/quizzes/", get(handlers::quiz::list))
        .route("/api/documents/{id}/chat/", post(handlers::chat::ask))
        .route("/api/documents/{id}/chats/", get(handlers::chat::list))
        // Prometheus metrics
        .route("/metrics", get(handlers::metrics::prometheus_metrics))
        .with_state(state)
        // Uploaded files
        .nest_service(media_prefix, media)
}
