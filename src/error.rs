//! Error handling for the resume scanner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Similarity ranking impossible: {0}")]
    RankerDegenerate(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Upload too large: {size} bytes (limit {limit} bytes)")]
    UploadTooLarge { size: u64, limit: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid record: {0}")]
    RecordValidation(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl ScannerError {
    /// True for failures caused by the input document itself rather than the
    /// environment. The CLI reports these as "could not read file".
    pub fn is_unreadable_document(&self) -> bool {
        matches!(
            self,
            ScannerError::SourceNotFound(_)
                | ScannerError::PdfExtraction(_)
                | ScannerError::UnsupportedFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScannerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ScannerError {
    fn from(err: anyhow::Error) -> Self {
        ScannerError::Processing(err.to_string())
    }
}
