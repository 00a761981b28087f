use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::load_document;
use crate::api::validators;
use crate::api::AppState;
use crate::db;
use crate::db::models::document::DocumentResponse;
use crate::error::{AppError, AppResult};
use crate::extract::extract_text_from_pdf;
use crate::storage::title_from_file_name;

/// GET /api/documents/, newest first.
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<DocumentResponse>>> {
    let docs = db::documents::fetch_all(&state.db).await?;
    let data = docs
        .into_iter()
        .map(|d| DocumentResponse::new(d, &state.storage))
        .collect();
    Ok(Json(data))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<DocumentResponse>> {
    let doc = load_document(&state, id).await?;
    Ok(Json(DocumentResponse::new(doc, &state.storage)))
}

struct UploadedFile {
    name: String,
    bytes: Bytes,
}

/// POST /api/documents/upload/: multipart `file` plus optional `title`.
///
/// The document row is created before extraction; a PDF that cannot be read
/// still produces a document, just without `extracted_text`.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DocumentResponse>)> {
    let mut raw_title: Option<String> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, state.max_upload_bytes))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => {
                raw_title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, state.max_upload_bytes))?,
                );
            }
            Some("file") => {
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    return Err(AppError::Validation(
                        "The submitted data was not a file. Check the encoding type on the form."
                            .to_string(),
                    ));
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, state.max_upload_bytes))?;
                file = Some(UploadedFile { name: file_name, bytes });
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("No file was submitted.".to_string()))?;
    if file.bytes.is_empty() {
        return Err(AppError::Validation("The submitted file is empty.".to_string()));
    }
    if file.bytes.len() > state.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(state.max_upload_bytes));
    }

    let title = match validators::title(raw_title.as_deref())? {
        Some(t) => t,
        None => validators::clamp_title(title_from_file_name(&file.name).trim().to_string()),
    };
    if title.is_empty() {
        return Err(AppError::Validation("A 'title' field is required.".to_string()));
    }

    let rel = state.storage.save(&file.name, &file.bytes).await?;
    let mut doc = match db::documents::insert(&state.db, &title, &rel).await {
        Ok(doc) => doc,
        Err(e) => {
            if let Err(rm) = state.storage.remove(&rel).await {
                warn!("Failed to remove orphaned upload {}: {}", rel, rm);
            }
            return Err(e.into());
        }
    };
    state.metrics.inc_uploaded();
    info!("Stored document {} ({}, {} bytes)", doc.id, rel, file.bytes.len());

    match extract_text_from_pdf(&state.storage.path(&rel)).await {
        Ok(text) => {
            db::documents::set_extracted_text(&state.db, doc.id, &text).await?;
            info!("Extracted {} characters from document {}", text.chars().count(), doc.id);
            doc.extracted_text = Some(text);
        }
        Err(e) => {
            state.metrics.inc_extraction_failed();
            error!("Text extraction failed for document {}: {}", doc.id, e);
        }
    }

    Ok((StatusCode::CREATED, Json(DocumentResponse::new(doc, &state.storage))))
}

/// DELETE /api/documents/{id}/. Quizzes and chats go with it.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let doc = load_document(&state, id).await?;

    if !db::documents::delete(&state.db, id).await? {
        return Err(AppError::NotFound(format!("document {}", id)));
    }

    if let Err(e) = state.storage.remove(&doc.file).await {
        warn!("Document {} deleted but its file {} could not be removed: {}", id, doc.file, e);
    }

    info!("Deleted document {}", id);
    Ok(Json(json!({"success": true})))
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(limit)
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
