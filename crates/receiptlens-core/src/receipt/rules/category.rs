//! Keyword-based spending category classification.

use crate::models::receipt::Category;

use super::patterns::CATEGORY_KEYWORDS;

/// Suggest a category from the receipt text and the extracted vendor.
///
/// Categories are checked in table order and the first one with a keyword
/// in either string wins; `Other` when nothing matches.
pub fn suggest_category(text: &str, vendor: Option<&str>) -> Category {
    let text_lower = text.to_lowercase();
    let vendor_lower = vendor.map(str::to_lowercase).unwrap_or_default();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|k| text_lower.contains(k) || vendor_lower.contains(k))
        })
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_keyword() {
        assert_eq!(suggest_category("", Some("Walgreens #88")), Category::Pharmacy);
    }

    #[test]
    fn test_text_keyword() {
        assert_eq!(suggest_category("UBER TRIP\nFare 12.00", None), Category::Transportation);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(suggest_category("KROGER", None), Category::Groceries);
    }

    #[test]
    fn test_declared_order_breaks_ties() {
        // "starbucks" (restaurant) and "shell" (gas) both present.
        let text = "STARBUCKS inside SHELL station";
        assert_eq!(suggest_category(text, None), Category::Restaurant);

        // "store" is retail, but "walmart" is groceries and declared first.
        assert_eq!(suggest_category("WALMART STORE", None), Category::Groceries);
    }

    #[test]
    fn test_substring_match() {
        // "gas company" is a utilities keyword, but "gas" is declared earlier.
        assert_eq!(suggest_category("City Gas Company bill", None), Category::Gas);
    }

    #[test]
    fn test_no_match_is_other() {
        assert_eq!(suggest_category("", None), Category::Other);
        assert_eq!(suggest_category("Hair salon", Some("Cuts R Us")), Category::Other);
    }
}
