//! File type detection

use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Sniff a byte buffer. Only PDF has a reliable signature; anything
    /// else that decodes as UTF-8 is treated as plain text.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(PDF_MAGIC) {
            FileType::Pdf
        } else if std::str::from_utf8(bytes).is_ok() {
            FileType::Text
        } else {
            FileType::Unknown
        }
    }
}

/// Case-insensitive extension check against an allow-list
pub fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
