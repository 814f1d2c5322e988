//! Storage of accepted résumé uploads

use crate::error::{Result, ScannerError};
use anyhow::Context;
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Reduce an uploaded file name to a safe, flat ASCII name. Accented letters
/// fold to their base letter (NFKD, then non-ASCII dropped), path parts are
/// dropped, whitespace becomes `_`, anything outside `[A-Za-z0-9._-]` is
/// removed and leading dots or underscores are trimmed.
pub fn sanitize_filename(name: &str) -> Result<String> {
    let folded: String = name.nfkd().filter(char::is_ascii).collect();
    let flattened = folded.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    let unsafe_chars = Regex::new(r"[^A-Za-z0-9_.-]")
        .map_err(|e| ScannerError::Processing(format!("Invalid filename regex: {}", e)))?;
    let cleaned = unsafe_chars.replace_all(&joined, "");
    let cleaned = cleaned.trim_start_matches(['.', '_']).trim_end_matches(['.', '_']);

    if cleaned.is_empty() {
        return Err(ScannerError::InvalidInput(format!(
            "File name {:?} has no usable characters",
            name
        )));
    }
    Ok(cleaned.to_string())
}

/// Write the upload into `uploads_dir` under its sanitised name and return
/// that name and the full path. An existing file of the same name is
/// replaced.
pub async fn store_upload(uploads_dir: &Path, original_name: &str, bytes: &[u8]) -> Result<(String, PathBuf)> {
    let filename = sanitize_filename(original_name)?;
    let destination = uploads_dir.join(&filename);

    tokio::fs::create_dir_all(uploads_dir)
        .await
        .with_context(|| format!("creating uploads directory {}", uploads_dir.display()))?;
    tokio::fs::write(&destination, bytes)
        .await
        .with_context(|| format!("saving upload to {}", destination.display()))?;

    Ok((filename, destination))
}

/// Name an accepted upload, copying it into `uploads_dir` only when `keep`
/// is set. Without a copy the returned path is `None`.
pub async fn accept_upload(
    uploads_dir: &Path,
    original_name: &str,
    bytes: &[u8],
    keep: bool,
) -> Result<(String, Option<PathBuf>)> {
    if keep {
        let (filename, destination) = store_upload(uploads_dir, original_name, bytes).await?;
        return Ok((filename, Some(destination)));
    }
    let filename = sanitize_filename(original_name)?;
    debug!("Not keeping a copy of {}", filename);
    Ok((filename, None))
}
