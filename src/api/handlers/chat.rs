use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;

use super::{load_document, load_document_with_text};
use crate::api::validators;
use crate::api::AppState;
use crate::db;
use crate::db::models::chat::{ChatRequest, ChatSessionResponse};
use crate::error::AppResult;

/// POST /api/documents/{id}/chat/
///
/// Body: `{"question": "..."}`.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<ChatSessionResponse>)> {
    let (doc, text) = load_document_with_text(&state, id).await?;

    // An unreadable body is treated like a missing question.
    let req: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    let question = validators::question(req.question.as_deref())?;

    let answer = state.assistant.chat(&text, &question).await.inspect_err(|_| {
        state.metrics.inc_ai_failed();
    })?;

    let session = db::chats::insert(&state.db, doc.id, &question, &answer).await?;
    state.metrics.inc_chats();
    info!("Answered question on document {} (chat {})", doc.id, session.id);

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// GET /api/documents/{id}/chats/
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<ChatSessionResponse>>> {
    let doc = load_document(&state, id).await?;
    let rows = db::chats::list_for_document(&state.db, doc.id).await?;
    Ok(Json(rows.into_iter().map(ChatSessionResponse::from).collect()))
}
