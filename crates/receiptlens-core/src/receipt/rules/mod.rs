//! Rule-based field extractors for receipts.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod patterns;
pub mod vendor;

pub use amounts::{parse_amount, TaxExtractor, TotalExtractor};
pub use category::suggest_category;
pub use dates::{DateExtractor, DateSource, ExtractedDate};
pub use patterns::{DateFamily, DateRule};
pub use vendor::VendorExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text, applying the field's selection policy.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract every candidate for the field, in discovery order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A candidate value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
