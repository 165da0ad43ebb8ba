//! Search query builder.

use crate::catalog::Product;
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Maximum page size.
pub const MAX_PER_PAGE: usize = 100;

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Featured order (catalog position).
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Sort by highest rated.
    Rating,
}

impl SortOption {
    /// All sort options, in menu order.
    pub const ALL: [SortOption; 6] = [
        SortOption::Featured,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::Rating,
    ];

    /// Stable CLI/serde name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
            SortOption::Rating => "rating",
        }
    }

    /// Label shown in the sort menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::Rating => "Highest Rated",
        }
    }

    /// Compare two products. Ties fall back to featured position.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceAsc => a.price.cmp(&b.price),
            SortOption::PriceDesc => b.price.cmp(&a.price),
            SortOption::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOption::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        };
        primary.then_with(|| a.position.cmp(&b.position))
    }

    /// Sort products in place (stable).
    pub fn sort(&self, products: &mut [&Product]) {
        products.sort_by(|a, b| self.compare(a, b));
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == normalized)
            .ok_or_else(|| {
                let valid: Vec<&str> = SortOption::ALL.iter().map(|o| o.as_str()).collect();
                format!("unknown sort '{}', expected one of: {}", s, valid.join(", "))
            })
    }
}

/// A catalog search query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    /// Filters to apply.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

impl SearchQuery {
    /// Create a new search query.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: SortOption::Featured,
            page: 1,
            per_page: 24,
        }
    }

    /// Set the text query. Blank text adds no filter.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.filters.push(Filter::text(q));
        }
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: usize, per_page: usize) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// Check whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new()
    }
}
