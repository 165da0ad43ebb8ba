//! Product catalog module.
//!
//! The catalog is an external, read-only supplier of product records.

mod collection;
mod featured;
mod product;

pub use collection::Catalog;
pub use product::Product;
