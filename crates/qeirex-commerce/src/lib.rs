//! Cart state and catalog types for the Qeirex storefront.
//!
//! This crate provides the pieces the storefront UI composes:
//!
//! - **Cart**: single-writer cart store with actions, selectors and subscriptions
//! - **Catalog**: read-only product records and the featured product set
//! - **Search**: category, price, tag, rating and text filters with sorting
//! - **Persist**: cart snapshots for hydrating a store from saved state
//!
//! # Example
//!
//! ```rust
//! use qeirex_commerce::prelude::*;
//!
//! let catalog = Catalog::featured();
//! let mut store = CartStore::new();
//!
//! let coffee = catalog.get(&ProductId::new("prod_1")).unwrap();
//! store.add(LineInput::from(coffee));
//! store.add(LineInput::from(coffee));
//! store.open();
//!
//! assert_eq!(store.item_count(), 2);
//! assert_eq!(store.total().display(), "$45.98");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod persist;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Cart
    pub use crate::cart::{
        CartAction, CartHandle, CartLineItem, CartState, CartStore, CartSummary, LineInput,
        SubscriptionId, ValidatingCart, ValidationRules,
    };

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Search
    pub use crate::search::{Filter, SearchQuery, SearchResults, SortOption};

    // Persist
    pub use crate::persist::{CartSnapshot, FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
}
