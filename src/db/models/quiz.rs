use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ai::DEFAULT_QUIZ_QUESTIONS;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Quiz {
    pub id: i64,
    pub document_id: i64,
    pub question: String,
    /// JSON object text, e.g. `{"A": "...", "B": "..."}`.
    pub options: String,
    pub correct_answer: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub id: i64,
    pub document: i64,
    pub question: String,
    pub options: Value,
    pub correct_answer: String,
}

impl From<Quiz> for QuizResponse {
    fn from(q: Quiz) -> Self {
        let options = serde_json::from_str(&q.options)
            .unwrap_or_else(|_| Value::Object(Map::new()));
        Self {
            id: q.id,
            document: q.document_id,
            question: q.question,
            options,
            correct_answer: q.correct_answer,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self { num_questions: DEFAULT_QUIZ_QUESTIONS }
    }
}

fn default_num_questions() -> u32 {
    DEFAULT_QUIZ_QUESTIONS
}
