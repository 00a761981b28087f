use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatSession {
    pub id: i64,
    pub document_id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatSessionResponse {
    pub id: i64,
    pub document: i64,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatSession> for ChatSessionResponse {
    fn from(c: ChatSession) -> Self {
        Self {
            id: c.id,
            document: c.document_id,
            question: c.question,
            answer: c.answer,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<String>,
}
