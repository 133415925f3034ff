//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{LensError, Result};

/// Main configuration for receiptlens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// OCR model configuration.
    pub ocr: OcrConfig,

    /// Receipt ingestion configuration.
    pub ingest: IngestConfig,

    /// Spending analytics configuration.
    pub analytics: AnalyticsConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.model_dir.join(model_name)
    }

    /// Whether the detection and recognition models are present on disk.
    pub fn models_present(&self) -> bool {
        self.model_path(&self.detection_model).exists()
            && self.model_path(&self.recognition_model).exists()
            && self.model_path(&self.dictionary).exists()
    }
}

/// Receipt ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Currency recorded on every receipt.
    pub currency: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            currency: super::receipt::default_currency(),
        }
    }
}

/// Spending analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Fraction of a budget (0.0 - 1.0) at which an alert is raised.
    pub alert_threshold: f64,

    /// Look-back window for trend and breakdown reports.
    pub months: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            alert_threshold: 0.8,
            months: 12,
        }
    }
}

impl LensConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.analytics.alert_threshold) {
            return Err(LensError::Config(format!(
                "analytics.alert_threshold must be within 0.0 - 1.0, got {}",
                self.analytics.alert_threshold
            )));
        }
        if self.ingest.currency.trim().is_empty() {
            return Err(LensError::Config("ingest.currency must not be empty".to_string()));
        }
        Ok(())
    }
}
