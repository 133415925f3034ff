//! Total and tax amount extraction.
//!
//! Totals take the largest candidate across every total pattern; tax takes
//! the first labelled match.

use rust_decimal::Decimal;
use std::str::FromStr;

use regex::Regex;
use tracing::debug;

use super::patterns::{ANY_AMOUNT, TAX_PATTERNS, TOTAL_PATTERNS};
use super::{ExtractionMatch, FieldExtractor};

/// Receipt total extractor.
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Total amount, `0` when nothing currency-shaped was found.
    pub fn total(&self, text: &str) -> Decimal {
        self.extract(text).map(|m| m.value).unwrap_or(Decimal::ZERO)
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let candidates = self.extract_all(text);
        if !candidates.is_empty() {
            return candidates.into_iter().max_by(|a, b| a.value.cmp(&b.value));
        }

        debug!("No total pattern matched, scanning for any amount");
        captured_amounts(&ANY_AMOUNT, text)
            .into_iter()
            .filter(|m| m.value > Decimal::ZERO)
            .max_by(|a, b| a.value.cmp(&b.value))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        TOTAL_PATTERNS
            .iter()
            .flat_map(|pattern| captured_amounts(pattern, text))
            .collect()
    }
}

/// Tax amount extractor.
pub struct TaxExtractor;

impl TaxExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Tax amount, `0` when no tax line was found.
    pub fn tax(&self, text: &str) -> Decimal {
        self.extract(text).map(|m| m.value).unwrap_or(Decimal::ZERO)
    }
}

impl Default for TaxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TaxExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        TAX_PATTERNS
            .iter()
            .flat_map(|pattern| captured_amounts(pattern, text))
            .collect()
    }
}

/// Every amount captured by group 1 of `pattern`, left to right.
fn captured_amounts(pattern: &Regex, text: &str) -> Vec<ExtractionMatch<Decimal>> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let full_match = caps.get(0)?;
            let amount = parse_amount(&caps[1])?;
            Some(
                ExtractionMatch::new(amount, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            )
        })
        .collect()
}

/// Parse a two-decimal amount such as `45.67` or `$1,234.50`.
///
/// Returns `None` for values outside the `Decimal` range; such candidates
/// are dropped, so a receipt holding only those totals to 0.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match Decimal::from_str(&cleaned) {
        Ok(amount) => Some(amount),
        Err(e) => {
            debug!("Dropping amount candidate {:?}: {}", s, e);
            None
        }
    }
}
