//! Error types for the receiptlens-core library.
//!
//! Field extraction has no error type of its own: every missing field resolves
//! to a documented fallback. Errors only come from the OCR collaborator and
//! from file/config handling around it.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the receiptlens library.
#[derive(Error, Debug)]
pub enum LensError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the OCR collaborator.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The receipt image does not exist.
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The file exists but could not be decoded as an image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The recognition engine itself failed.
    #[error("OCR engine failure: {0}")]
    Engine(String),
}

/// Result type for the receiptlens library.
pub type Result<T> = std::result::Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = OcrError::NotFound(PathBuf::from("receipts/missing.jpg"));
        assert_eq!(err.to_string(), "image not found: receipts/missing.jpg");
    }

    #[test]
    fn test_ocr_error_converts_into_lens_error() {
        let err: LensError = OcrError::Engine("boom".to_string()).into();
        assert!(matches!(err, LensError::Ocr(OcrError::Engine(_))));
        assert_eq!(err.to_string(), "OCR error: OCR engine failure: boom");
    }
}
