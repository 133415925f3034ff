//! Purchase date extraction.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use tracing::debug;

use super::patterns::{DateRule, DATE_RULES};
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
///
/// Families are tried in [`DATE_RULES`] order, matches left to right, and
/// each match against its family's templates in order. The first candidate
/// that parses wins.
pub struct DateExtractor;

/// How the purchase date was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// Parsed from the receipt text.
    Parsed,
    /// No candidate parsed; the extraction-time clock was used.
    Fallback,
}

/// Resolved purchase date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedDate {
    pub value: NaiveDateTime,
    pub source: DateSource,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the purchase date, falling back to the current local time.
    pub fn resolve(&self, text: &str) -> ExtractedDate {
        self.resolve_with(text, || Local::now().naive_local())
    }

    /// Resolve the purchase date with an explicit clock for the fallback.
    pub fn resolve_with(&self, text: &str, now: impl FnOnce() -> NaiveDateTime) -> ExtractedDate {
        match self.extract(text) {
            Some(found) => {
                debug!(
                    "Purchase date {} from {:?} at {:?}",
                    found.value, found.source, found.position
                );
                ExtractedDate {
                    value: found.value,
                    source: DateSource::Parsed,
                }
            }
            None => {
                let value = now();
                debug!("No parsable date found, using current time {}", value);
                ExtractedDate {
                    value,
                    source: DateSource::Fallback,
                }
            }
        }
    }

    /// Years before 1 are rejected like any other unparsable candidate.
    fn parse_candidate(rule: &DateRule, candidate: &str) -> Option<NaiveDateTime> {
        rule.templates.iter().find_map(|template| {
            NaiveDate::parse_from_str(candidate, template)
                .ok()
                .filter(|date| date.year() >= 1)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDateTime>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for rule in DATE_RULES.iter() {
            for m in rule.pattern.find_iter(text) {
                if let Some(value) = Self::parse_candidate(rule, m.as_str()) {
                    return Some(ExtractionMatch::new(value, m.as_str()).with_position(m.start(), m.end()));
                }
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for rule in DATE_RULES.iter() {
            for m in rule.pattern.find_iter(text) {
                if let Some(value) = Self::parse_candidate(rule, m.as_str()) {
                    results.push(
                        ExtractionMatch::new(value, m.as_str()).with_position(m.start(), m.end()),
                    );
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_month_day_year() {
        let result = DateExtractor::new().extract("Purchase Date: 01/15/2024").unwrap();
        assert_eq!(result.value, midnight(2024, 1, 15));
        assert_eq!(result.source, "01/15/2024");
    }

    #[test]
    fn test_day_month_year_second_template() {
        // 15 is not a valid month, so the day-first template is used.
        let result = DateExtractor::new().extract("15/01/2024").unwrap();
        assert_eq!(result.value, midnight(2024, 1, 15));
    }

    #[test]
    fn test_ambiguous_date_reads_month_first() {
        let result = DateExtractor::new().extract("03/04/2024").unwrap();
        assert_eq!(result.value, midnight(2024, 3, 4));
    }

    #[test]
    fn test_year_first() {
        let result = DateExtractor::new().extract("Date 2024-01-15 10:32").unwrap();
        assert_eq!(result.value, midnight(2024, 1, 15));
    }

    #[test]
    fn test_month_name() {
        let extractor = DateExtractor::new();
        assert_eq!(
            extractor.extract("Visited January 15, 2024").unwrap().value,
            midnight(2024, 1, 15)
        );
        assert_eq!(
            extractor.extract("Mar 3, 2023").unwrap().value,
            midnight(2023, 3, 3)
        );
    }

    #[test]
    fn test_family_priority_beats_text_order() {
        // The ISO date appears first in the text, but the slash family is tried first.
        let text = "Printed 2023-12-31\nSold 01/15/2024";
        let result = DateExtractor::new().extract(text).unwrap();
        assert_eq!(result.value, midnight(2024, 1, 15));
    }

    #[test]
    fn test_first_parsable_match_wins() {
        // 13/45/2024 matches the pattern but parses under no template.
        let text = "Ref 13/45/2024\nDate 02/03/2024\nDue 04/05/2024";
        let result = DateExtractor::new().extract(text).unwrap();
        assert_eq!(result.value, midnight(2024, 2, 3));
    }

    #[test]
    fn test_year_zero_is_rejected() {
        let extracted = DateExtractor::new().resolve_with("Printed 0000-01-01", || midnight(2000, 1, 1));
        assert_eq!(extracted.source, DateSource::Fallback);

        let result = DateExtractor::new().extract("0000-01-01 then 2024-02-03").unwrap();
        assert_eq!(result.value, midnight(2024, 2, 3));
    }

    #[test]
    fn test_dashed_month_first_has_no_template() {
        let extracted = DateExtractor::new().resolve_with("01-15-2024", || midnight(2000, 1, 1));
        assert_eq!(extracted.source, DateSource::Fallback);
    }

    #[test]
    fn test_fallback_uses_clock() {
        let now = midnight(2030, 6, 1);
        let extracted = DateExtractor::new().resolve_with("no dates here", || now);
        assert_eq!(extracted.value, now);
        assert_eq!(extracted.source, DateSource::Fallback);
    }

    #[test]
    fn test_fallback_is_close_to_wall_clock() {
        let before = Local::now().naive_local();
        let extracted = DateExtractor::new().resolve("");
        let after = Local::now().naive_local();
        assert_eq!(extracted.source, DateSource::Fallback);
        assert!(extracted.value >= before && extracted.value <= after);
    }

    #[test]
    fn test_extract_all_in_priority_order() {
        let text = "2024-02-01 and 01/20/2024 and Feb 5, 2024";
        let values: Vec<NaiveDateTime> = DateExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(
            values,
            vec![midnight(2024, 1, 20), midnight(2024, 2, 1), midnight(2024, 2, 5)]
        );
    }
}
