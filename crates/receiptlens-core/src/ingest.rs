//! Receipt ingestion: OCR, field extraction, and the derived transaction.

use std::path::Path;

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::models::config::IngestConfig;
use crate::models::receipt::{ExtractedFields, Receipt, Transaction};
use crate::ocr::{run_ocr, OcrEngine};
use crate::receipt::{HybridReceiptParser, ReceiptParser};

/// A receipt and the transaction derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestedReceipt {
    pub receipt: Receipt,

    /// Only present when the receipt total is positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
}

/// Turns receipt images into receipts and transactions.
pub struct ReceiptIngestor {
    engine: Box<dyn OcrEngine>,
    parser: HybridReceiptParser,
    config: IngestConfig,
}

impl ReceiptIngestor {
    pub fn new(engine: impl OcrEngine + 'static) -> Self {
        Self {
            engine: Box::new(engine),
            parser: HybridReceiptParser::new(),
            config: IngestConfig::default(),
        }
    }

    pub fn with_parser(mut self, parser: HybridReceiptParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    /// OCR the image at `path` and build the receipt.
    ///
    /// OCR failures are returned unchanged; extraction itself cannot fail.
    pub fn ingest(&self, path: &Path) -> Result<IngestedReceipt> {
        let raw_text = run_ocr(self.engine.as_ref(), path)?;
        Ok(self.ingest_text(&path.to_string_lossy(), &raw_text))
    }

    /// Build the receipt from text that was already recognized.
    pub fn ingest_text(&self, image_path: &str, raw_text: &str) -> IngestedReceipt {
        let fields = self.parser.parse(raw_text);
        let receipt = self.build_receipt(image_path, raw_text, &fields);
        let transaction = derive_transaction(&receipt);

        match &transaction {
            Some(txn) => info!(
                "Ingested receipt {} with transaction {} ({} {})",
                receipt.id, txn.id, txn.amount, receipt.currency
            ),
            None => warn!(
                "Ingested receipt {} with zero total, no transaction created",
                receipt.id
            ),
        }

        IngestedReceipt {
            receipt,
            transaction,
        }
    }

    fn build_receipt(&self, image_path: &str, raw_text: &str, fields: &ExtractedFields) -> Receipt {
        Receipt {
            id: Uuid::new_v4(),
            image_path: image_path.to_string(),
            vendor: fields.vendor.clone(),
            purchase_date: fields.purchase_date,
            total_amount: fields.total,
            tax_amount: fields.tax,
            currency: self.config.currency.clone(),
            category: fields.category,
            raw_ocr_text: raw_text.to_string(),
            created_at: Local::now().naive_local(),
        }
    }
}

/// Transaction recorded for a receipt with a positive total.
pub fn derive_transaction(receipt: &Receipt) -> Option<Transaction> {
    if receipt.total_amount <= Decimal::ZERO {
        return None;
    }

    Some(Transaction {
        id: Uuid::new_v4(),
        receipt_id: Some(receipt.id),
        amount: receipt.total_amount,
        category: receipt.category.as_str().to_string(),
        description: Some(format!(
            "Receipt from {}",
            receipt.vendor.as_deref().unwrap_or("Unknown")
        )),
        transaction_date: receipt.purchase_date,
        is_recurring: false,
    })
}
