//! Cart line item types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Everything except `quantity` is a snapshot of the product taken when
/// it was first added. Later catalog changes are not re-synced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product this line refers to. Unique within a cart.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Quantity. At least 1 for lines created by the store.
    pub quantity: i64,
}

impl CartLineItem {
    /// Create a line item from an add payload with the given quantity.
    pub fn from_input(input: LineInput, quantity: i64) -> Self {
        Self {
            id: input.id,
            name: input.name,
            price: input.price,
            image: input.image,
            description: input.description,
            category: input.category,
            quantity,
        }
    }

    /// Line total (price * quantity).
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// Payload for adding a product to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineInput {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    #[serde(default)]
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LineInput {
    /// Create an add payload with no optional fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            description: None,
            category: None,
        }
    }

    /// Set the image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl From<&Product> for LineInput {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item =
            CartLineItem::from_input(LineInput::new("p1", "Coffee Blend", Money::new(2299)), 3);
        assert_eq!(item.line_total(), Money::new(6897));
    }

    #[test]
    fn test_from_product_copies_snapshot_fields() {
        let product = Product::new("prod_6", "Lavender Dreams", Money::new(2299))
            .with_category("BATH")
            .with_image("/products/lavender-dreams.jpg")
            .with_tag("Popular");
        let input = LineInput::from(&product);
        assert_eq!(input.id, product.id);
        assert_eq!(input.category.as_deref(), Some("BATH"));
        assert_eq!(input.image.as_deref(), Some("/products/lavender-dreams.jpg"));
        assert!(input.description.is_none());
    }
}
