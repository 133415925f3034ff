//! Core library for receipt OCR processing.
//!
//! This crate provides:
//! - Rule-based receipt field extraction (vendor, date, total, tax, category)
//! - An OCR seam with a pure Rust engine backed by PaddleOCR models
//! - Receipt ingestion producing receipts and derived transactions
//! - Spending analytics (monthly trends, category breakdown, budget alerts)

pub mod analytics;
pub mod error;
pub mod ingest;
pub mod models;
pub mod ocr;
pub mod receipt;

pub use analytics::{BudgetAlert, CategorySpend, MonthlySpendPoint, SpendingReport};
pub use error::{LensError, OcrError, Result};
pub use ingest::{IngestedReceipt, ReceiptIngestor};
pub use models::config::LensConfig;
pub use models::receipt::{Budget, Category, ExtractedFields, Receipt, Transaction};
pub use ocr::{run_ocr, OcrEngine, TextFileEngine};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use receipt::{extract_fields, HybridReceiptParser, ReceiptParser, VendorProposer};
