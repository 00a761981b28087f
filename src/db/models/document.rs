use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::storage::Storage;

pub const TITLE_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Document {
    pub id: i64,
    pub title: String,
    /// Path relative to the media root.
    pub file: String,
    pub extracted_text: Option<String>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// The extracted text, if there is any worth sending to the model.
    pub fn usable_text(&self) -> Option<&str> {
        self.extracted_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub id: i64,
    pub title: String,
    pub file: String,
    pub extracted_text: Option<String>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DocumentResponse {
    pub fn new(doc: Document, storage: &Storage) -> Self {
        Self {
            file: storage.url(&doc.file),
            id: doc.id,
            title: doc.title,
            extracted_text: doc.extracted_text,
            summary: doc.summary,
            created_at: doc.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub document_id: i64,
    pub short_summary: String,
    pub bullet_points: Vec<String>,
}
