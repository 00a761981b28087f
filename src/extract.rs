//! PDF text extraction.
//!
//! Wraps the pdf-extract crate. Parsing runs on the blocking pool since it is
//! CPU-bound and the parser can panic on malformed input.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Could not read PDF file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read PDF file: {0}")]
    Pdf(String),

    #[error("Could not read PDF file: parser aborted")]
    Aborted,
}

/// Extract the text of every page of the PDF at `path`, trimmed.
pub async fn extract_text_from_pdf(path: &Path) -> Result<String, ExtractError> {
    let path: PathBuf = path.to_path_buf();
    match tokio::task::spawn_blocking(move || extract_blocking(&path)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("PDF extraction task failed: {}", e);
            Err(ExtractError::Aborted)
        }
    }
}

fn extract_blocking(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(normalize(&text))
}

/// Trim surrounding whitespace. Line layout inside the text is kept as the
/// parser produced it.
fn normalize(text: &str) -> String {
    text.trim().to_string()
}
