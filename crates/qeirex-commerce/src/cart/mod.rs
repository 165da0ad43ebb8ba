//! Shopping cart module.
//!
//! Contains the cart store, its actions and state, the shared handle,
//! display summaries, and the validation boundary.

mod action;
mod handle;
mod line_item;
mod state;
mod store;
mod summary;
mod validation;

pub use action::CartAction;
pub use handle::CartHandle;
pub use line_item::{CartLineItem, LineInput};
pub use state::CartState;
pub use store::{CartStore, SubscriptionId};
pub use summary::{CartSummary, DEFAULT_FREE_SHIPPING_THRESHOLD};
pub use validation::{ValidatingCart, ValidationRules, MAX_QUANTITY_PER_ITEM};
