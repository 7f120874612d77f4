// src/uploads.rs
//! Local-disk storage for product images.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

const FALLBACK_NAME: &str = "upload";
const MAX_NAME_ATTEMPTS: i64 = 16;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    // Stored without surrounding slashes, e.g. "uploads".
    prefix: String,
}

/// `<millis>-<name>`, keeping only the final path component of `original_name`.
fn stored_name(timestamp_millis: i64, original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or(FALLBACK_NAME);
    format!("{timestamp_millis}-{base}")
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            root: root.into(),
            prefix: url_prefix.trim_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Mount point of the static asset route, e.g. `/uploads`.
    pub fn url_path(&self) -> String {
        format!("/{}", self.prefix)
    }

    /// Writes `bytes` under a fresh name and returns the reference stored on
    /// the product, e.g. `uploads/1700000000000-lamp.png`.
    pub async fn store(&self, bytes: &[u8], original_name: &str) -> io::Result<String> {
        fs::create_dir_all(&self.root).await?;

        let mut timestamp = Utc::now().timestamp_millis();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = stored_name(timestamp, original_name);
            let opened = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&name))
                .await;

            match opened {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    info!(file = %name, size = bytes.len(), "Stored upload");
                    return Ok(format!("{}/{}", self.prefix, name));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => timestamp += 1,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "could not find a free upload name",
        ))
    }

    fn path_for(&self, reference: &str) -> Option<PathBuf> {
        let name = reference.strip_prefix(&self.prefix)?.strip_prefix('/')?;
        if name.is_empty() || name.contains(['/', '\\']) {
            return None;
        }
        Some(self.root.join(name))
    }

    /// Deletes a previously stored file. Failures are logged, not returned.
    pub async fn remove(&self, reference: &str) {
        let Some(path) = self.path_for(reference) else {
            warn!(%reference, "Not an upload reference, nothing removed");
            return;
        };
        if let Err(e) = fs::remove_file(&path).await {
            warn!(error = %e, path = %path.display(), "Failed to remove orphaned upload");
        }
    }
}
