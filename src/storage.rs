//! On-disk storage for uploaded files.

use anyhow::{Context, Result};
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Subdirectory of the media root that holds uploaded documents.
pub const UPLOAD_DIR: &str = "documents";

const FALLBACK_NAME: &str = "document.pdf";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("Invalid regex"));

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
    url_prefix: String,
}

impl Storage {
    /// Create the upload directory under `media_root` if needed.
    pub async fn init(media_root: impl Into<PathBuf>, media_url: &str) -> Result<Self> {
        let root = media_root.into();
        let dir = root.join(UPLOAD_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create media directory {}", dir.display()))?;

        tracing::info!("Media storage ready: {}", root.display());
        Ok(Self {
            root,
            url_prefix: media_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under the upload directory and return the path relative
    /// to the media root. Existing files are never overwritten.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let name = sanitize_file_name(original_name);
        let mut candidate = name.clone();

        loop {
            let rel = format!("{UPLOAD_DIR}/{candidate}");
            let file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&rel))
                .await;

            match file {
                Ok(mut f) => {
                    use tokio::io::AsyncWriteExt;
                    let written = match f.write_all(bytes).await {
                        Ok(()) => f.flush().await,
                        Err(e) => Err(e),
                    };
                    drop(f);
                    return match written {
                        Ok(()) => Ok(rel),
                        Err(e) => Err(self.discard_partial(&rel, e).await),
                    };
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    candidate = with_random_suffix(&name);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Remove a half-written upload and hand back the write error.
    async fn discard_partial(&self, rel: &str, err: std::io::Error) -> std::io::Error {
        if let Err(rm) = self.remove(rel).await {
            tracing::warn!("Failed to remove partial upload {}: {}", rel, rm);
        }
        err
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn url(&self, rel: &str) -> String {
        format!("{}/{}", self.url_prefix, rel)
    }

    /// Delete a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, rel: &str) -> std::io::Result<()> {
        match tokio::fs::remove_file(self.path(rel)).await {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Reduce a client-supplied filename to a safe basename.
pub fn sanitize_file_name(original: &str) -> String {
    // Clients may send a full path; only the last component is kept.
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned = UNSAFE_CHARS.replace_all(base.trim(), "_");
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// `notes.pdf` -> `notes_a1b2c3d.pdf`
fn with_random_suffix(name: &str) -> String {
    let suffix: String = uuid::Uuid::new_v4().simple().to_string().chars().take(7).collect();
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{suffix}.{ext}"),
        _ => format!("{name}_{suffix}"),
    }
}

/// Title used when the client did not send one: the filename without its
/// last extension.
pub fn title_from_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    match base.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => base.to_string(),
    }
}
