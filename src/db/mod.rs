use anyhow::Result;
use sqlx::SqlitePool;
use std::str::FromStr;
use crate::config::Config;

pub mod chats;
pub mod documents;
pub mod models;
pub mod quizzes;

pub type DbPool = SqlitePool;

pub async fn init(cfg: &Config) -> Result<DbPool> {
    let db_url = format!("sqlite://{}?mode=rwc", cfg.database.path);

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(20)
        .connect_with(
            sqlx::sqlite::SqliteConnectOptions::from_str(&db_url)?
                .create_if_missing(true)
                .foreign_keys(true)
        )
        .await?;

    migrate(&pool).await?;

    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA synchronous=NORMAL")
        .execute(&pool)
        .await?;

    tracing::info!("Database connected: {}", cfg.database.path);
    Ok(pool)
}

/// Apply the embedded migrations.
pub async fn migrate(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./src/db/migrations").run(pool).await?;
    Ok(())
}
