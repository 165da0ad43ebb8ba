//! Commerce error types.
//!
//! The cart store itself never fails. These errors come from the
//! boundaries around it: input validation, catalog lookups and snapshot
//! persistence.

use thiserror::Error;

/// Errors that can occur around cart and catalog operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product id is empty or whitespace.
    #[error("Product id must not be empty")]
    EmptyProductId,

    /// Price is NaN or infinite.
    #[error("Price must be a finite number")]
    NonFinitePrice,

    /// Price is below zero.
    #[error("Negative price for {product_id}: {amount}")]
    NegativePrice { product_id: String, amount: String },

    /// Invalid quantity.
    #[error("Invalid quantity for {product_id}: {quantity}")]
    InvalidQuantity { product_id: String, quantity: i64 },

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// The same product id appears twice in a bulk initialize.
    #[error("Duplicate line item: {0}")]
    DuplicateLineItem(String),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Snapshot written by an unknown format version.
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshotVersion { found: u32, expected: u32 },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl CommerceError {
    /// Check if this error was raised by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::EmptyProductId
                | CommerceError::NonFinitePrice
                | CommerceError::NegativePrice { .. }
                | CommerceError::InvalidQuantity { .. }
                | CommerceError::QuantityExceedsLimit(..)
                | CommerceError::DuplicateLineItem(_)
        )
    }
}
