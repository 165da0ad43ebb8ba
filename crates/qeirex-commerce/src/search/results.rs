//! Search results and pagination.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of matching items.
    pub total: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(per_page)
        };

        Self {
            page: page.max(1),
            per_page,
            total,
            total_pages,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 24, 0)
    }
}

/// Category facet with the number of matching products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryFacet {
    /// Category label.
    pub category: String,
    /// Matching products in this category.
    pub count: usize,
}

/// One page of catalog search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Products on this page, in sorted order.
    pub products: Vec<Product>,
    /// Pagination info.
    pub pagination: Pagination,
    /// Per-category counts over all matches (not just this page).
    pub facets: Vec<CategoryFacet>,
}

impl SearchResults {
    /// Slice sorted matches into a page and compute facets.
    pub(crate) fn paginate(matched: &[&Product], page: usize, per_page: usize) -> Self {
        let pagination = Pagination::new(page, per_page, matched.len());
        let products = matched
            .iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .map(|p| (*p).clone())
            .collect();

        let mut facets: Vec<CategoryFacet> = Vec::new();
        for category in matched.iter().filter_map(|p| p.category.as_deref()) {
            match facets
                .iter_mut()
                .find(|f| f.category.eq_ignore_ascii_case(category))
            {
                Some(facet) => facet.count += 1,
                None => facets.push(CategoryFacet {
                    category: category.to_string(),
                    count: 1,
                }),
            }
        }

        Self {
            products,
            pagination,
            facets,
        }
    }

    /// Total number of matches across all pages.
    pub fn total_count(&self) -> usize {
        self.pagination.total
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.pagination.has_next()
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.pagination.has_prev()
    }

    /// Check if there are no matches.
    pub fn is_empty(&self) -> bool {
        self.pagination.total == 0
    }
}
