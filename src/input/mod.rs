//! Input processing module
//! Handles file detection, upload validation and text extraction

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::{InputManager, Upload};
pub use text_extractor::{DocumentSource, PdfExtractor};
