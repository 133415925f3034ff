//! Vendor (merchant name) extraction.

use super::patterns::{HAS_LETTER, VENDOR_SKIP_PREFIX, VENDOR_STRIP};
use super::{ExtractionMatch, FieldExtractor};

/// Longest vendor name kept, in characters.
pub const MAX_VENDOR_LEN: usize = 255;

/// Picks the first line that looks like a business name.
pub struct VendorExtractor;

impl VendorExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a single line into a vendor candidate, or reject it.
    fn candidate(line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() || !HAS_LETTER.is_match(line) || VENDOR_SKIP_PREFIX.is_match(line) {
            return None;
        }

        let cleaned = VENDOR_STRIP.replace_all(line, "");
        if cleaned.chars().count() > 2 {
            Some(cleaned.chars().take(MAX_VENDOR_LEN).collect())
        } else {
            None
        }
    }
}

impl Default for VendorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VendorExtractor {
    type Output = ExtractionMatch<String>;

    /// First qualifying line wins; line order is the only tie-break.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        let mut offset = 0;

        for line in text.split('\n') {
            if let Some(vendor) = Self::candidate(line) {
                results.push(
                    ExtractionMatch::new(vendor, line.trim())
                        .with_position(offset, offset + line.len()),
                );
            }
            offset += line.len() + 1;
        }

        results
    }
}
