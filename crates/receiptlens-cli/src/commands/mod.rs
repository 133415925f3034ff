//! CLI subcommands and the helpers they share.

pub mod analytics;
pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use receiptlens_core::error::OcrError;
use receiptlens_core::models::config::LensConfig;
use receiptlens_core::{OcrEngine, PureOcrEngine, TextFileEngine};

/// Image extensions handed to the OCR engine.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp", "webp"];

/// Load the config from `path`, else the default location, else defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<LensConfig> {
    if let Some(path) = path {
        return Ok(LensConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config {}", default_path.display());
        Ok(LensConfig::from_file(&default_path)?)
    } else {
        Ok(LensConfig::default())
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Whether the file is pre-recognized OCR text.
pub fn is_text_input(path: &Path) -> bool {
    extension(path) == "txt"
}

/// Whether the file is a supported receipt input.
pub fn is_supported_input(path: &Path) -> bool {
    let ext = extension(path);
    ext == "txt" || IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Routes `.txt` files to [`TextFileEngine`] and images to the OCR models.
pub struct DispatchEngine {
    images: Option<PureOcrEngine>,
}

impl DispatchEngine {
    /// Build an engine for `inputs`, loading OCR models only if an image is among them.
    pub fn for_inputs(
        inputs: &[PathBuf],
        config: &LensConfig,
        model_dir: Option<&Path>,
    ) -> anyhow::Result<Self> {
        if inputs.iter().all(|p| is_text_input(p)) {
            return Ok(Self { images: None });
        }

        let mut ocr_config = config.ocr.clone();
        if let Some(dir) = model_dir {
            ocr_config.model_dir = dir.to_path_buf();
        }

        if !ocr_config.models_present() {
            anyhow::bail!(
                "OCR models not found in {}.\n\n\
                 Place {}, {} and {} there, or pass --model-dir.",
                ocr_config.model_dir.display(),
                ocr_config.detection_model,
                ocr_config.recognition_model,
                ocr_config.dictionary
            );
        }

        Ok(Self {
            images: Some(PureOcrEngine::from_config(&ocr_config)?),
        })
    }
}

impl OcrEngine for DispatchEngine {
    fn name(&self) -> &'static str {
        match self.images {
            Some(ref engine) => engine.name(),
            None => TextFileEngine.name(),
        }
    }

    fn recognize(&self, path: &Path) -> Result<String, OcrError> {
        if is_text_input(path) {
            return TextFileEngine.recognize(path);
        }
        match self.images {
            Some(ref engine) => engine.recognize(path),
            None => Err(OcrError::ModelLoad("OCR models were not loaded".to_string())),
        }
    }
}
