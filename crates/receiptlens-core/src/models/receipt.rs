//! Receipt, transaction and budget data models.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spending category assigned to a receipt.
///
/// Declaration order is the classifier's tie-break order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Groceries,
    Restaurant,
    Gas,
    Pharmacy,
    Retail,
    Utilities,
    Transportation,
    /// Catch-all when no keyword matched.
    #[default]
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 8] = [
        Category::Groceries,
        Category::Restaurant,
        Category::Gas,
        Category::Pharmacy,
        Category::Retail,
        Category::Utilities,
        Category::Transportation,
        Category::Other,
    ];

    /// Lower-case label used in storage and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::Restaurant => "restaurant",
            Category::Gas => "gas",
            Category::Pharmacy => "pharmacy",
            Category::Retail => "retail",
            Category::Utilities => "utilities",
            Category::Transportation => "transportation",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured fields produced by one extraction pass over OCR text.
///
/// Every field is populated; missing data resolves to a fallback value
/// rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Best-guess merchant name (at most 255 characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Purchase date, or the wall-clock time of extraction when no date was found.
    pub purchase_date: NaiveDateTime,

    /// Receipt total, `0` when nothing currency-shaped was found.
    pub total: Decimal,

    /// Tax amount, `0` when no tax line was found.
    pub tax: Decimal,

    /// Spending category, `Other` when no keyword matched.
    pub category: Category,
}

/// A processed receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,

    /// Path of the source image, as given to the ingestor.
    pub image_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    pub purchase_date: NaiveDateTime,

    pub total_amount: Decimal,

    pub tax_amount: Decimal,

    /// ISO currency code (default: USD).
    #[serde(default = "default_currency")]
    pub currency: String,

    pub category: Category,

    /// Unmodified OCR output the fields were extracted from.
    pub raw_ocr_text: String,

    pub created_at: NaiveDateTime,
}

pub(crate) fn default_currency() -> String {
    "USD".to_string()
}

/// A spending transaction, either derived from a receipt or entered manually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,

    /// Receipt this transaction was derived from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<Uuid>,

    pub amount: Decimal,

    /// Free-form category label; receipts use [`Category`] labels.
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub transaction_date: NaiveDateTime,

    #[serde(default)]
    pub is_recurring: bool,
}

impl Transaction {
    /// Create a manual transaction with a fresh id.
    pub fn new(amount: Decimal, category: impl Into<String>, transaction_date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            receipt_id: None,
            amount,
            category: category.into(),
            description: None,
            transaction_date,
            is_recurring: false,
        }
    }
}

/// Monthly spending limit for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub monthly_limit: Decimal,
}

impl Budget {
    pub fn new(category: impl Into<String>, monthly_limit: Decimal) -> Self {
        Self {
            category: category.into(),
            monthly_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Groceries.as_str(), "groceries");
        assert_eq!(Category::Other.to_string(), "other");
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Transportation).unwrap();
        assert_eq!(json, "\"transportation\"");
    }

    #[test]
    fn test_transaction_deserializes_with_defaults() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "amount": "12.50",
            "category": "restaurant",
            "transaction_date": "2024-01-15T12:00:00"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.amount, Decimal::new(1250, 2));
        assert!(txn.receipt_id.is_none());
        assert!(!txn.is_recurring);
    }
}
