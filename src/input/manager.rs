//! Input manager: upload validation and routing to the right extractor

use crate::config::InputConfig;
use crate::error::{Result, ScannerError};
use crate::input::file_detector::{has_allowed_extension, FileType};
use crate::input::text_extractor::{
    DocumentSource, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// A résumé upload that passed validation, held in memory
#[derive(Debug, Clone)]
pub struct Upload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

pub struct InputManager {
    max_upload_bytes: u64,
    allowed_extensions: Vec<String>,
    cache: HashMap<String, String>,
}

impl InputManager {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes,
            allowed_extensions: config.allowed_extensions.clone(),
            cache: HashMap::new(),
        }
    }

    /// Validate and read a résumé upload: it must exist, carry an allowed
    /// extension and fit within the size limit. A `.pdf` upload must also
    /// start with the PDF signature.
    pub async fn read_upload(&self, path: &Path) -> Result<Upload> {
        let original_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ScannerError::InvalidInput(format!("No file name in: {}", path.display())))?;

        if !has_allowed_extension(path, &self.allowed_extensions) {
            return Err(ScannerError::UnsupportedFormat(format!(
                "Invalid or missing file. Only {} allowed: {}",
                self.allowed_extensions.join(", ").to_uppercase(),
                original_name
            )));
        }

        let metadata = fs::metadata(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ScannerError::SourceNotFound(format!("Resume file not found: {}", path.display()))
            }
            _ => ScannerError::Io(e),
        })?;

        if metadata.len() > self.max_upload_bytes {
            return Err(ScannerError::UploadTooLarge {
                size: metadata.len(),
                limit: self.max_upload_bytes,
            });
        }

        let bytes = DocumentSource::from(path).read_bytes().await?;
        if FileType::from_path(path) == FileType::Pdf && FileType::from_bytes(&bytes) != FileType::Pdf {
            return Err(ScannerError::UnsupportedFormat(format!(
                "{} is not a PDF document",
                original_name
            )));
        }
        info!("Accepted upload {} ({} bytes)", original_name, bytes.len());

        Ok(Upload { original_name, bytes })
    }

    /// Extract text from any supported file, routed by extension
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(ScannerError::SourceNotFound(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let source = DocumentSource::from(path);
        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(&source).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(&source).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(&source).await?
            }
            FileType::Unknown => {
                return Err(ScannerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
