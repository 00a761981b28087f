use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use docstudy::{ai, api, config, db, metrics, storage};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docstudy=info".parse()?)
        )
        .init();

    info!("Starting docstudy v{}", env!("CARGO_PKG_VERSION"));

    let cfg = config::load()?;
    info!("Configuration loaded");

    let db_pool = db::init(&cfg).await?;
    info!("Database initialized");

    let storage = storage::Storage::init(&cfg.storage.media_root, &cfg.storage.media_url).await?;
    let assistant = ai::StudyAssistant::new(&cfg.ai)?;
    let metrics = Arc::new(metrics::StudyMetrics::default());

    api::serve(cfg, db_pool, storage, assistant, metrics).await?;

    info!("Server stopped");
    Ok(())
}
