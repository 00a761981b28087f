use chrono::Utc;
use serde_json::Value;

use super::models::quiz::Quiz;
use super::DbPool;
use crate::ai::QuizItem;

/// Persist every generated question for a document in one transaction.
pub async fn insert_many(
    db: &DbPool,
    document_id: i64,
    items: &[QuizItem],
) -> Result<Vec<Quiz>, sqlx::Error> {
    let now = Utc::now();
    let mut tx = db.begin().await?;
    let mut created = Vec::with_capacity(items.len());

    for item in items {
        let options = Value::Object(item.options.clone()).to_string();
        let result = sqlx::query(
            "INSERT INTO quizzes (document_id, question, options, correct_answer, created_at)
             VALUES (?, ?, ?, ?, ?)"
        )
        .bind(document_id)
        .bind(&item.question)
        .bind(&options)
        .bind(&item.correct_answer)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        created.push(Quiz {
            id: result.last_insert_rowid(),
            document_id,
            question: item.question.clone(),
            options,
            correct_answer: item.correct_answer.clone(),
            created_at: now,
        });
    }

    tx.commit().await?;
    Ok(created)
}

pub async fn list_for_document(db: &DbPool, document_id: i64) -> Result<Vec<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(
        "SELECT id, document_id, question, options, correct_answer, created_at
         FROM quizzes WHERE document_id = ? ORDER BY id ASC"
    )
    .bind(document_id)
    .fetch_all(db)
    .await
}
