//! OCR collaborator: turns a receipt image into raw text.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use std::path::Path;

use tracing::{debug, info};

use crate::error::OcrError;

/// Trait that OCR engines implement.
pub trait OcrEngine {
    /// Engine identifier (e.g. "pure-onnx-ocr").
    fn name(&self) -> &'static str;

    /// Recognize the text in the file at `path`.
    fn recognize(&self, path: &Path) -> Result<String, OcrError>;
}

/// Run OCR on a receipt file.
///
/// Fails with [`OcrError::NotFound`] when the file is missing; otherwise
/// returns the engine's text with surrounding whitespace removed.
pub fn run_ocr(engine: &dyn OcrEngine, path: &Path) -> Result<String, OcrError> {
    if !path.exists() {
        return Err(OcrError::NotFound(path.to_path_buf()));
    }

    info!("Running {} on {}", engine.name(), path.display());
    let text = engine.recognize(path)?;
    debug!("OCR produced {} characters", text.len());

    Ok(text.trim().to_string())
}

/// Engine for receipts that were already recognized elsewhere: the file
/// content is taken as the OCR text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFileEngine;

impl OcrEngine for TextFileEngine {
    fn name(&self) -> &'static str {
        "text-file"
    }

    fn recognize(&self, path: &Path) -> Result<String, OcrError> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => OcrError::NotFound(path.to_path_buf()),
            _ => OcrError::Engine(format!("failed to read {}: {}", path.display(), e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingEngine;

    impl OcrEngine for FailingEngine {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn recognize(&self, _path: &Path) -> Result<String, OcrError> {
            Err(OcrError::Engine("model crashed".to_string()))
        }
    }

    /// Engines may keep non-thread-safe state.
    struct CountingEngine {
        calls: std::cell::Cell<usize>,
    }

    impl OcrEngine for CountingEngine {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn recognize(&self, _path: &Path) -> Result<String, OcrError> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("  call {}  ", self.calls.get()))
        }
    }

    #[test]
    fn test_engine_without_sync_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        std::fs::write(&path, b"png").unwrap();

        let engine = CountingEngine { calls: std::cell::Cell::new(0) };
        assert_eq!(run_ocr(&engine, &path).unwrap(), "call 1");
        assert_eq!(run_ocr(&engine, &path).unwrap(), "call 2");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = run_ocr(&TextFileEngine, Path::new("/nonexistent/receipt.txt")).unwrap_err();
        assert!(matches!(err, OcrError::NotFound(_)));
    }

    #[test]
    fn test_text_file_engine_trims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        std::fs::write(&path, "\n  KROGER\nTOTAL 5.00  \n\n").unwrap();

        let text = run_ocr(&TextFileEngine, &path).unwrap();
        assert_eq!(text, "KROGER\nTOTAL 5.00");
    }

    #[test]
    fn test_engine_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.jpg");
        std::fs::write(&path, b"not really a jpeg").unwrap();

        let err = run_ocr(&FailingEngine, &path).unwrap_err();
        assert!(matches!(err, OcrError::Engine(_)));
    }
}
