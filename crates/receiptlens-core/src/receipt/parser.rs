//! Receipt parser composing the rule-based extractors.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::models::receipt::ExtractedFields;

use super::rules::{suggest_category, DateExtractor, DateSource, TaxExtractor, TotalExtractor, VendorExtractor};
use super::VendorProposer;

/// Trait for receipt parsing.
///
/// Parsing never fails: every field has a fallback value.
pub trait ReceiptParser {
    /// Extract structured fields from raw OCR text.
    fn parse(&self, text: &str) -> ExtractedFields;
}

/// Receipt parser combining rules with a pluggable vendor strategy.
pub struct HybridReceiptParser {
    vendor: Box<dyn VendorProposer>,
    dates: DateExtractor,
    totals: TotalExtractor,
    taxes: TaxExtractor,
    /// Clock read when no purchase date is found.
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl HybridReceiptParser {
    /// Create a parser with the rule-based vendor extractor.
    pub fn new() -> Self {
        Self {
            vendor: Box::new(VendorExtractor::new()),
            dates: DateExtractor::new(),
            totals: TotalExtractor::new(),
            taxes: TaxExtractor::new(),
            clock: local_now,
        }
    }

    /// Replace the vendor strategy.
    pub fn with_vendor_proposer(mut self, proposer: impl VendorProposer + 'static) -> Self {
        self.vendor = Box::new(proposer);
        self
    }

    /// Set the clock used for the purchase-date fallback.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for HybridReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for HybridReceiptParser {
    fn parse(&self, text: &str) -> ExtractedFields {
        info!("Extracting receipt fields from {} characters of text", text.len());

        let vendor = self.vendor.propose_vendor(text);
        let date = self.dates.resolve_with(text, self.clock);
        let total = self.totals.total(text);
        let tax = self.taxes.tax(text);
        let category = suggest_category(text, vendor.as_deref());

        if date.source == DateSource::Fallback {
            info!("No purchase date found, using extraction time");
        }
        debug!(
            "Extracted vendor={:?} date={} total={} tax={} category={}",
            vendor, date.value, total, tax, category
        );

        ExtractedFields {
            vendor,
            purchase_date: date.value,
            total,
            tax,
            category,
        }
    }
}

/// Extract receipt fields with the default rule-based parser.
pub fn extract_fields(text: &str) -> ExtractedFields {
    HybridReceiptParser::new().parse(text)
}
