//! Recognition patterns and rule tables for receipt extraction.
//!
//! Rule order in every table is significant: it decides which candidate
//! wins when several patterns match.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::receipt::Category;

/// Date pattern family, in the order families are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFamily {
    /// `A/B/YYYY` or `A-B-YYYY`, read month first.
    MonthDayYear,
    /// `YYYY/A/B` or `YYYY-A-B`.
    YearMonthDay,
    /// `January 15, 2024` / `Jan 15 2024`.
    MonthName,
}

/// A date pattern plus the templates its matches are parsed with.
#[derive(Debug)]
pub struct DateRule {
    pub family: DateFamily,
    pub pattern: Regex,
    /// `chrono` format strings, tried in order.
    pub templates: &'static [&'static str],
}

lazy_static! {
    // Vendor lines
    pub static ref VENDOR_SKIP_PREFIX: Regex = Regex::new(
        r"(?i)^(?:TOTAL|TAX|SUBTOTAL|DATE|RECEIPT|THANK|YOU)"
    ).unwrap();

    pub static ref VENDOR_STRIP: Regex = Regex::new(
        r"[^\w\s&-]"
    ).unwrap();

    pub static ref HAS_LETTER: Regex = Regex::new(
        r"[A-Za-z]"
    ).unwrap();

    // Dates
    pub static ref DATE_RULES: Vec<DateRule> = vec![
        DateRule {
            family: DateFamily::MonthDayYear,
            pattern: Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b").unwrap(),
            templates: &["%m/%d/%Y", "%d/%m/%Y"],
        },
        DateRule {
            family: DateFamily::YearMonthDay,
            pattern: Regex::new(r"\b(\d{4})[/-](\d{1,2})[/-](\d{1,2})\b").unwrap(),
            templates: &["%Y-%m-%d"],
        },
        DateRule {
            family: DateFamily::MonthName,
            pattern: Regex::new(r"(?i)\b([A-Za-z]{3,9})\s+(\d{1,2}),?\s+(\d{4})\b").unwrap(),
            templates: &["%B %d, %Y", "%b %d, %Y"],
        },
    ];

    // Totals: labelled, dollar-prefixed, bare two-decimal number
    pub static ref TOTAL_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:TOTAL|AMOUNT|TOTAL\s+DUE)[\s:]*\$?\s*(\d+\.\d{2})").unwrap(),
        Regex::new(r"\$(\d+\.\d{2})").unwrap(),
        Regex::new(r"(?i)(\d+\.\d{2})\s*(?:USD)?").unwrap(),
    ];

    /// Last-resort amount scan when no total pattern matched.
    pub static ref ANY_AMOUNT: Regex = Regex::new(
        r"\$?\s*(\d+\.\d{2})"
    ).unwrap();

    // Tax lines
    pub static ref TAX_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:TAX|SALES\s+TAX)[\s:]*\$?\s*(\d+\.\d{2})").unwrap(),
        Regex::new(r"(?i)TAX\s+(\d+\.\d{2})").unwrap(),
    ];
}

/// Category keyword table. Keywords are lower-case substrings; the first
/// category with any hit wins.
pub static CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Groceries,
        &["grocery", "supermarket", "walmart", "target", "kroger", "safeway"],
    ),
    (
        Category::Restaurant,
        &["restaurant", "cafe", "coffee", "starbucks", "mcdonald", "burger", "pizza"],
    ),
    (
        Category::Gas,
        &["gas", "fuel", "shell", "chevron", "exxon", "bp", "mobil"],
    ),
    (
        Category::Pharmacy,
        &["pharmacy", "cvs", "walgreens", "rite aid", "drug"],
    ),
    (Category::Retail, &["store", "shop", "retail", "amazon"]),
    (
        Category::Utilities,
        &["electric", "water", "gas company", "utility"],
    ),
    (
        Category::Transportation,
        &["uber", "lyft", "taxi", "metro", "transit"],
    ),
];
