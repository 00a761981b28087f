pub mod chat;
pub mod documents;
pub mod health;
pub mod metrics;
pub mod quiz;
pub mod summary;

use crate::api::validators::NO_TEXT_MESSAGE;
use crate::api::AppState;
use crate::db::models::document::Document;
use crate::error::{AppError, AppResult};

/// Fetch a document or fail with 404.
pub(crate) async fn load_document(state: &AppState, id: i64) -> AppResult<Document> {
    crate::db::documents::fetch(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("document {}", id)))
}

/// Fetch a document that has text the assistant can work with.
pub(crate) async fn load_document_with_text(state: &AppState, id: i64) -> AppResult<(Document, String)> {
    let doc = load_document(state, id).await?;
    let text = doc
        .usable_text()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(NO_TEXT_MESSAGE.to_string()))?;
    Ok((doc, text))
}
