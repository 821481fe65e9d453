/**
 * Upload Spooling
 *
 * Writes the first file part of a multipart body to the upload directory
 * under a random name that keeps the original extension. The file lives
 * exactly as long as its `TempUpload` guard.
 */

use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use axum::http::StatusCode;
use tokio::io::AsyncWriteExt;

use crate::backend::error::BackendError;
use crate::backend::util::random_urlsafe;

/// Random bytes in an object key (32 base64url characters)
pub const KEY_RANDOM_BYTES: usize = 24;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Object key for an uploaded file: random base64url stem plus the
/// original extension
///
/// Extensions with anything but ASCII letters and digits are dropped.
pub fn object_key_for(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}.{}", random_urlsafe(KEY_RANDOM_BYTES), ext),
        None => random_urlsafe(KEY_RANDOM_BYTES),
    }
}

/// A spooled file, removed from disk when dropped
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed spooled upload {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove spooled upload {}: {}", self.path.display(), e),
        }
    }
}

/// The first file of a multipart body, flushed to disk
#[derive(Debug)]
pub struct SpooledUpload {
    pub file: TempUpload,
    pub key: String,
    pub content_type: String,
    pub size: u64,
}

/// Spool the first part carrying a filename to `dir`
///
/// # Errors
///
/// * `UploadTooLarge` - the part is bigger than `max_bytes`
/// * `HandlerError` (400) - the body has no file part
/// * `Multipart` / `Io` - malformed body or disk failure
///
/// The partial file is removed on every error path.
pub async fn spool_first_file(
    dir: &Path,
    mut multipart: Multipart,
    max_bytes: u64,
) -> Result<SpooledUpload, BackendError> {
    while let Some(mut field) = multipart.next_field().await? {
        let Some(original_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field
            .content_type()
            .map(str::to_owned)
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        let key = object_key_for(&original_name);
        let temp = TempUpload { path: dir.join(&key) };
        let mut file = tokio::fs::File::create(temp.path()).await?;

        let mut size: u64 = 0;
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len() as u64;
            if size > max_bytes {
                tracing::warn!("Upload {} exceeds {} bytes", original_name, max_bytes);
                return Err(BackendError::UploadTooLarge { limit: max_bytes });
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        drop(file);

        tracing::debug!("Spooled {} as {} ({} bytes)", original_name, key, size);

        return Ok(SpooledUpload {
            file: temp,
            key,
            content_type,
            size,
        });
    }

    Err(BackendError::handler(StatusCode::BAD_REQUEST, "No file in upload"))
}
