//! Read-only ordered product collection.

use crate::cart::LineInput;
use crate::catalog::featured::featured_products;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::{SearchQuery, SearchResults};
use serde::{Deserialize, Serialize};

/// The product catalog.
///
/// The cart store never queries the catalog. Callers look products up here
/// and pass the resulting [`LineInput`] to the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from products, keeping their order.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's eight featured products.
    pub fn featured() -> Self {
        Self::new(featured_products())
    }

    /// Parse a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Get a product by ID.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Build the cart input for a product.
    pub fn line_input(&self, id: &ProductId) -> Result<LineInput, CommerceError> {
        self.get(id)
            .map(LineInput::from)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Iterate products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct category labels in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for category in self.products.iter().filter_map(|p| p.category.as_deref()) {
            if !seen.iter().any(|c| c.eq_ignore_ascii_case(category)) {
                seen.push(category);
            }
        }
        seen
    }

    /// Run a search query against the catalog.
    pub fn search(&self, query: &SearchQuery) -> SearchResults {
        let mut matched: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| query.matches(p))
            .collect();
        query.sort.sort(&mut matched);

        SearchResults::paginate(&matched, query.page, query.per_page)
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
