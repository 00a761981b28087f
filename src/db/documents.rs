use chrono::Utc;

use super::models::document::Document;
use super::DbPool;

const COLUMNS: &str = "id, title, file, extracted_text, summary, created_at";

pub async fn insert(db: &DbPool, title: &str, file: &str) -> Result<Document, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query("INSERT INTO documents (title, file, created_at) VALUES (?, ?, ?)")
        .bind(title)
        .bind(file)
        .bind(now)
        .execute(db)
        .await?;

    Ok(Document {
        id: result.last_insert_rowid(),
        title: title.to_string(),
        file: file.to_string(),
        extracted_text: None,
        summary: None,
        created_at: now,
    })
}

pub async fn fetch(db: &DbPool, id: i64) -> Result<Option<Document>, sqlx::Error> {
    sqlx::query_as::<_, Document>(&format!("SELECT {COLUMNS} FROM documents WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// All documents, newest first.
pub async fn fetch_all(db: &DbPool) -> Result<Vec<Document>, sqlx::Error> {
    sqlx::query_as::<_, Document>(&format!(
        "SELECT {COLUMNS} FROM documents ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(db)
    .await
}

pub async fn set_extracted_text(db: &DbPool, id: i64, text: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE documents SET extracted_text = ? WHERE id = ?")
        .bind(text)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn set_summary(db: &DbPool, id: i64, summary: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE documents SET summary = ? WHERE id = ?")
        .bind(summary)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Returns `false` when no row had that id.
pub async fn delete(db: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
