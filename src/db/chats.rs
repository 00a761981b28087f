use chrono::Utc;

use super::models::chat::ChatSession;
use super::DbPool;

pub async fn insert(
    db: &DbPool,
    document_id: i64,
    question: &str,
    answer: &str,
) -> Result<ChatSession, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO chat_sessions (document_id, question, answer, created_at)
         VALUES (?, ?, ?, ?)"
    )
    .bind(document_id)
    .bind(question)
    .bind(answer)
    .bind(now)
    .execute(db)
    .await?;

    Ok(ChatSession {
        id: result.last_insert_rowid(),
        document_id,
        question: question.to_string(),
        answer: answer.to_string(),
        created_at: now,
    })
}

/// Conversation history for a document, oldest first.
pub async fn list_for_document(
    db: &DbPool,
    document_id: i64,
) -> Result<Vec<ChatSession>, sqlx::Error> {
    sqlx::query_as::<_, ChatSession>(
        "SELECT id, document_id, question, answer, created_at
         FROM chat_sessions WHERE document_id = ? ORDER BY created_at ASC, id ASC"
    )
    .bind(document_id)
    .fetch_all(db)
    .await
}
