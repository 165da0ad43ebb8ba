//! Search filter types.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Category label that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// A catalog filter. Filters in a query combine with AND.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// Filter by category label (case-insensitive; "All" matches everything).
    Category { category: String },
    /// Filter by inclusive price range.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only show in-stock items.
    InStock,
    /// Filter by merchandising tag.
    Tag { tag: String },
    /// Filter by minimum rating.
    MinRating { min: f32 },
    /// Substring search in name, description and category.
    Text { query: String },
}

impl Filter {
    /// Create a category filter.
    pub fn category(category: impl Into<String>) -> Self {
        Filter::Category {
            category: category.into(),
        }
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create an in-stock filter.
    pub fn in_stock() -> Self {
        Filter::InStock
    }

    /// Create a tag filter.
    pub fn tag(tag: impl Into<String>) -> Self {
        Filter::Tag { tag: tag.into() }
    }

    /// Create a minimum rating filter.
    pub fn min_rating(min: f32) -> Self {
        Filter::MinRating { min }
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text {
            query: query.into(),
        }
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category { category } => {
                category.eq_ignore_ascii_case(ALL_CATEGORIES) || product.in_category(category)
            }
            Filter::PriceRange { min, max } => {
                min.map_or(true, |min| product.price >= min)
                    && max.map_or(true, |max| product.price <= max)
            }
            Filter::InStock => product.in_stock,
            Filter::Tag { tag } => product.has_tag(tag),
            Filter::MinRating { min } => product.rating >= *min,
            Filter::Text { query } => product.matches_text(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64) -> Product {
        Product::new("p", "Rose Petal Spa", Money::new(price_cents))
            .with_category("BATH")
            .with_rating(4.9, 203)
            .with_tag("Premium")
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let filter = Filter::price_range(Some(Money::new(1000)), Some(Money::new(2000)));
        assert!(filter.matches(&product(1000)));
        assert!(filter.matches(&product(2000)));
        assert!(!filter.matches(&product(2001)));
        assert!(!filter.matches(&product(999)));
    }

    #[test]
    fn test_open_ended_price_range() {
        let filter = Filter::price_range(None, Some(Money::new(2500)));
        assert!(filter.matches(&product(1)));
        assert!(!filter.matches(&product(3199)));
    }

    #[test]
    fn test_in_stock() {
        let mut p = product(100);
        assert!(Filter::in_stock().matches(&p));
        p.in_stock = false;
        assert!(!Filter::in_stock().matches(&p));
    }

    #[test]
    fn test_tag_rating_and_text() {
        let p = product(3199);
        assert!(Filter::tag("premium").matches(&p));
        assert!(!Filter::tag("New").matches(&p));
        assert!(Filter::min_rating(4.5).matches(&p));
        assert!(!Filter::min_rating(5.0).matches(&p));
        assert!(Filter::text("petal").matches(&p));
    }

    #[test]
    fn test_filter_serde_tagging() {
        let json = serde_json::to_string(&Filter::category("DETOX")).unwrap();
        assert_eq!(json, r#"{"type":"category","category":"DETOX"}"#);
    }
}
