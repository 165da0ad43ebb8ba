//! Input validation at the boundary in front of the cart store.
//!
//! The store trusts its caller. Data arriving from outside (form posts,
//! replay files, saved snapshots) goes through [`ValidatingCart`] first,
//! which checks an action against [`ValidationRules`] and only dispatches
//! it if it passes. A rejected action leaves the store untouched.

use std::collections::HashSet;

use crate::cart::{CartAction, CartLineItem, CartStore, LineInput};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Which checks the boundary applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Reject empty or whitespace-only product ids.
    pub require_id: bool,
    /// Accept prices below zero.
    pub allow_negative_prices: bool,
    /// Upper bound on any line's quantity.
    pub max_quantity: i64,
    /// Reject `initialize` payloads that repeat an id.
    pub require_unique_ids: bool,
    /// Reject `initialize` payloads with a quantity below 1.
    pub require_positive_quantities: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_id: true,
            allow_negative_prices: false,
            max_quantity: MAX_QUANTITY_PER_ITEM,
            require_unique_ids: true,
            require_positive_quantities: true,
        }
    }
}

impl ValidationRules {
    /// Rules that accept everything the store accepts.
    pub fn permissive() -> Self {
        Self {
            require_id: false,
            allow_negative_prices: true,
            max_quantity: i64::MAX,
            require_unique_ids: false,
            require_positive_quantities: false,
        }
    }

    /// Check an action against these rules, given the current store.
    pub fn check(&self, store: &CartStore, action: &CartAction) -> Result<(), CommerceError> {
        match action {
            CartAction::Add(input) => self.check_add(store, input),
            CartAction::UpdateQuantity { id, quantity } => self.check_update(store, id, *quantity),
            CartAction::Initialize { items } => self.check_items(items),
            CartAction::Remove { .. }
            | CartAction::ToggleOpen
            | CartAction::Open
            | CartAction::Close
            | CartAction::Clear => Ok(()),
        }
    }

    fn check_add(&self, store: &CartStore, input: &LineInput) -> Result<(), CommerceError> {
        self.check_id(&input.id)?;
        self.check_price(&input.id, input.price)?;
        let next = store
            .get(&input.id)
            .map_or(1, |line| line.quantity.saturating_add(1));
        self.check_quantity_limit(next)
    }

    fn check_update(
        &self,
        store: &CartStore,
        id: &ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        // Removals and unknown ids are no-ops in the store.
        if quantity <= 0 || store.get(id).is_none() {
            return Ok(());
        }
        self.check_quantity_limit(quantity)
    }

    fn check_items(&self, items: &[CartLineItem]) -> Result<(), CommerceError> {
        let mut seen: HashSet<&ProductId> = HashSet::with_capacity(items.len());
        for item in items {
            self.check_id(&item.id)?;
            self.check_price(&item.id, item.price)?;
            if self.require_positive_quantities && item.quantity < 1 {
                return Err(CommerceError::InvalidQuantity {
                    product_id: item.id.to_string(),
                    quantity: item.quantity,
                });
            }
            self.check_quantity_limit(item.quantity)?;
            if self.require_unique_ids && !seen.insert(&item.id) {
                return Err(CommerceError::DuplicateLineItem(item.id.to_string()));
            }
        }
        Ok(())
    }

    fn check_id(&self, id: &ProductId) -> Result<(), CommerceError> {
        if self.require_id && id.is_blank() {
            return Err(CommerceError::EmptyProductId);
        }
        Ok(())
    }

    fn check_price(&self, id: &ProductId, price: Money) -> Result<(), CommerceError> {
        if !self.allow_negative_prices && price.is_negative() {
            return Err(CommerceError::NegativePrice {
                product_id: id.to_string(),
                amount: price.display(),
            });
        }
        Ok(())
    }

    fn check_quantity_limit(&self, quantity: i64) -> Result<(), CommerceError> {
        if quantity > self.max_quantity {
            return Err(CommerceError::QuantityExceedsLimit(quantity, self.max_quantity));
        }
        Ok(())
    }
}

/// A cart store behind a validation boundary.
pub struct ValidatingCart<'a> {
    store: &'a mut CartStore,
    rules: ValidationRules,
}

impl<'a> ValidatingCart<'a> {
    /// Wrap a store with the given rules.
    pub fn new(store: &'a mut CartStore, rules: ValidationRules) -> Self {
        Self { store, rules }
    }

    /// The rules in effect.
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Read-only access to the wrapped store.
    pub fn store(&self) -> &CartStore {
        &*self.store
    }

    /// Validate and dispatch. Returns whether the state changed.
    pub fn dispatch(&mut self, action: CartAction) -> Result<bool, CommerceError> {
        if let Err(err) = self.rules.check(&*self.store, &action) {
            warn!(action = action.name(), error = %err, "rejected cart action");
            return Err(err);
        }
        Ok(self.store.dispatch(action))
    }

    /// Validated [`CartStore::add`].
    pub fn add(&mut self, input: LineInput) -> Result<bool, CommerceError> {
        self.dispatch(CartAction::Add(input))
    }

    /// Validated [`CartStore::update_quantity`].
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.clone(),
            quantity,
        })
    }

    /// Validated [`CartStore::initialize`].
    pub fn initialize(&mut self, items: Vec<CartLineItem>) -> Result<bool, CommerceError> {
        self.dispatch(CartAction::Initialize { items })
    }

    /// [`CartStore::remove`]; removal is always accepted.
    pub fn remove(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        self.dispatch(CartAction::Remove { id: id.clone() })
    }
}
