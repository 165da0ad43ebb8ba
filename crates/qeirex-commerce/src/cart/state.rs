//! Cart state and the reducer that transitions it.

use crate::cart::{CartAction, CartLineItem, CartSummary, LineInput};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Cart contents plus panel visibility.
///
/// Fields are private: `total` is a cached projection of `items` and is
/// recomputed inside every transition that can affect it, so readers never
/// observe a stale total. Deserializing recomputes it too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCartState")]
pub struct CartState {
    items: Vec<CartLineItem>,
    is_open: bool,
    total: Money,
}

#[derive(Deserialize)]
struct RawCartState {
    #[serde(default)]
    items: Vec<CartLineItem>,
    #[serde(default)]
    is_open: bool,
}

impl From<RawCartState> for CartState {
    fn from(raw: RawCartState) -> Self {
        let mut state = CartState {
            items: raw.items,
            is_open: raw.is_open,
            total: Money::zero(),
        };
        state.recompute_total();
        state
    }
}

impl CartState {
    /// Empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    // Selectors

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart panel should be shown.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Totals for display, with a free-shipping threshold.
    pub fn summary(&self, free_shipping_threshold: Money) -> CartSummary {
        CartSummary::from_state(self, free_shipping_threshold)
    }

    // Transitions

    /// Apply an action. Returns true if the state observably changed.
    pub(crate) fn apply(&mut self, action: CartAction) -> bool {
        let changed = match action {
            CartAction::Add(input) => self.add(input),
            CartAction::Remove { id } => self.remove(&id),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(&id, quantity),
            CartAction::ToggleOpen => {
                self.is_open = !self.is_open;
                true
            }
            CartAction::Open => !std::mem::replace(&mut self.is_open, true),
            CartAction::Close => std::mem::replace(&mut self.is_open, false),
            CartAction::Clear => {
                let changed = !self.items.is_empty();
                self.items.clear();
                changed
            }
            CartAction::Initialize { items } => {
                let changed = self.items != items;
                self.items = items;
                changed
            }
        };
        self.recompute_total();
        changed
    }

    fn add(&mut self, input: LineInput) -> bool {
        match self.items.iter_mut().find(|item| item.id == input.id) {
            // Repeat adds keep the first-added snapshot fields.
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => self.items.push(CartLineItem::from_input(input, 1)),
        }
        true
    }

    fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() < len_before
    }

    fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                let changed = item.quantity != quantity;
                item.quantity = quantity;
                changed
            }
            None => false,
        }
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(CartLineItem::line_total).sum();
    }
}
