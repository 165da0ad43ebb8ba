//! Search module.
//!
//! Contains catalog filters, sorting, and pagination.

mod filter;
mod query;
mod results;

pub use filter::{Filter, ALL_CATEGORIES};
pub use query::{SearchQuery, SortOption, MAX_PER_PAGE};
pub use results::{CategoryFacet, Pagination, SearchResults};
