use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use super::load_document_with_text;
use crate::api::AppState;
use crate::db;
use crate::db::models::document::SummaryResponse;
use crate::error::AppResult;

/// POST /api/documents/{id}/summarize/
///
/// Only the short summary is stored on the document; bullet points are
/// returned to the caller.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<SummaryResponse>> {
    let (doc, text) = load_document_with_text(&state, id).await?;

    let summary = state.assistant.summarize(&text).await.inspect_err(|_| {
        state.metrics.inc_ai_failed();
    })?;

    db::documents::set_summary(&state.db, doc.id, &summary.short).await?;
    state.metrics.inc_summaries();
    info!("Summarized document {} ({} bullet points)", doc.id, summary.bullets.len());

    Ok(Json(SummaryResponse {
        document_id: doc.id,
        short_summary: summary.short,
        bullet_points: summary.bullets,
    }))
}
