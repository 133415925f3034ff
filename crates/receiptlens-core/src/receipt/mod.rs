//! Receipt field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract_fields, HybridReceiptParser, ReceiptParser};

use rules::{FieldExtractor, VendorExtractor};

/// Strategy that proposes a vendor name for a receipt.
///
/// The rule-based [`VendorExtractor`] is the default; a learned model can
/// be plugged into [`HybridReceiptParser`] without changing its contract.
pub trait VendorProposer: Send + Sync {
    /// Propose a vendor candidate, or `None` if nothing plausible was found.
    fn propose_vendor(&self, text: &str) -> Option<String>;
}

impl VendorProposer for VendorExtractor {
    fn propose_vendor(&self, text: &str) -> Option<String> {
        self.extract(text).map(|m| m.value)
    }
}
