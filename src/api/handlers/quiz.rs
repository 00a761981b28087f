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
use crate::db::models::quiz::{QuizRequest, QuizResponse};
use crate::error::{AppError, AppResult};

/// POST /api/documents/{id}/quiz/
///
/// Body `{"num_questions": n}` is optional.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Vec<QuizResponse>>)> {
    let (doc, text) = load_document_with_text(&state, id).await?;

    let req = parse_body(&body)?;
    let n = validators::num_questions(req.num_questions)?;

    let items = state.assistant.quiz(&text, n).await.inspect_err(|_| {
        state.metrics.inc_ai_failed();
    })?;

    let created = db::quizzes::insert_many(&state.db, doc.id, &items).await?;
    state.metrics.add_quiz_questions(created.len() as u64);
    info!("Created {} quiz questions for document {} (requested {})", created.len(), doc.id, n);

    let data = created.into_iter().map(QuizResponse::from).collect();
    Ok((StatusCode::CREATED, Json(data)))
}

/// GET /api/documents/{id}/quizzes/
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<QuizResponse>>> {
    let doc = load_document(&state, id).await?;
    let rows = db::quizzes::list_for_document(&state.db, doc.id).await?;
    Ok(Json(rows.into_iter().map(QuizResponse::from).collect()))
}

fn parse_body(body: &[u8]) -> AppResult<QuizRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(QuizRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::DEFAULT_QUIZ_QUESTIONS;

    #[test]
    fn test_empty_body_uses_default_count() {
        assert_eq!(parse_body(b"").unwrap().num_questions, DEFAULT_QUIZ_QUESTIONS);
        assert_eq!(parse_body(b"  \n").unwrap().num_questions, DEFAULT_QUIZ_QUESTIONS);
        assert_eq!(parse_body(b"{}").unwrap().num_questions, DEFAULT_QUIZ_QUESTIONS);
    }

    #[test]
    fn test_explicit_count() {
        assert_eq!(parse_body(br#"{"num_questions": 3}"#).unwrap().num_questions, 3);
    }

    #[test]
    fn test_malformed_body_rejected() {
        assert!(parse_body(b"{num_questions").is_err());
        assert!(parse_body(br#"{"num_questions": -1}"#).is_err());
    }
}
