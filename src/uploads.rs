//! Member photo storage on the local filesystem.

use chrono::Utc;
use std::path::PathBuf;
use tracing::{debug, warn};

/// URL prefix the upload directory is served under.
pub const PUBLIC_PREFIX: &str = "/img";

/// A photo written to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    /// Location on disk.
    pub path: PathBuf,
    /// Reference saved in `users.foto`, e.g. `/img/1700000000000_a.png`.
    pub public_path: String,
}

#[derive(Debug, Clone)]
pub struct PhotoUploads {
    dir: PathBuf,
}

impl PhotoUploads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` as `<unix millis>_<sanitized name>`.
    ///
    /// Two uploads with the same name in the same millisecond land on the
    /// same file; the later one wins.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<StoredPhoto> {
        let file_name = stored_file_name(Utc::now().timestamp_millis(), original_name);
        let path = self.dir.join(&file_name);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored {} bytes at {}", bytes.len(), path.display());

        Ok(StoredPhoto {
            path,
            public_path: format!("{}/{}", PUBLIC_PREFIX, file_name),
        })
    }

    /// Best-effort removal of a photo whose user row was never written.
    pub async fn discard(&self, photo: &StoredPhoto) {
        if let Err(e) = tokio::fs::remove_file(&photo.path).await {
            warn!("Could not remove orphaned upload {}: {}", photo.path.display(), e);
        }
    }
}

pub fn stored_file_name(timestamp_millis: i64, original_name: &str) -> String {
    format!("{}_{}", timestamp_millis, sanitize_file_name(original_name))
}

/// Keep the last path component and replace anything outside
/// `[A-Za-z0-9._-]`, so a client-supplied name can't leave the upload dir.
pub fn sanitize_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        cleaned
    }
}
