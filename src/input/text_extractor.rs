//! Text extraction from PDF, plain text and Markdown sources

use crate::error::{Result, ScannerError};
use log::debug;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Where document content comes from: a file on disk or an in-memory
/// byte stream (for example an upload that was never written out).
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl DocumentSource {
    /// Resolve the source to raw bytes. A path that does not exist is a
    /// `SourceNotFound`, not an I/O error.
    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            DocumentSource::Bytes(bytes) => Ok(bytes.clone()),
            DocumentSource::Path(path) => {
                if !fs::try_exists(path).await.unwrap_or(false) {
                    return Err(ScannerError::SourceNotFound(format!(
                        "Resume file not found: {}",
                        path.display()
                    )));
                }
                Ok(fs::read(path).await?)
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Path(path) => path.display().to_string(),
            DocumentSource::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }
}

impl From<&Path> for DocumentSource {
    fn from(path: &Path) -> Self {
        DocumentSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for DocumentSource {
    fn from(bytes: Vec<u8>) -> Self {
        DocumentSource::Bytes(bytes)
    }
}

pub trait TextExtractor {
    fn extract(&self, source: &DocumentSource) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// Concatenated text of every page, in page order. Pages without a text
    /// layer contribute nothing, so an image-only PDF yields `""`.
    pub fn extract_bytes(bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs instead of returning an error
        let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                return Err(ScannerError::PdfExtraction(format!(
                    "Failed to extract text from PDF: {}",
                    e
                )))
            }
            Err(_) => {
                return Err(ScannerError::PdfExtraction(
                    "PDF parser aborted on malformed input".to_string(),
                ))
            }
        };

        debug!("Extracted {} characters from PDF", text.len());
        Ok(text)
    }
}

impl TextExtractor for PdfExtractor {
    async fn extract(&self, source: &DocumentSource) -> Result<String> {
        let bytes = source.read_bytes().await?;
        Self::extract_bytes(&bytes).map_err(|e| match e {
            ScannerError::PdfExtraction(msg) => {
                ScannerError::PdfExtraction(format!("{} ({})", msg, source.describe()))
            }
            other => other,
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, source: &DocumentSource) -> Result<String> {
        let bytes = source.read_bytes().await?;
        String::from_utf8(bytes).map_err(|_| {
            ScannerError::UnsupportedFormat(format!("{} is not valid UTF-8 text", source.describe()))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, source: &DocumentSource) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(source).await?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> Result<String> {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let tag_regex = Regex::new(r"<[^>]*>")
            .map_err(|e| ScannerError::Processing(format!("Invalid tag regex: {}", e)))?;
        let clean_text = tag_regex.replace_all(&text, "");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}
