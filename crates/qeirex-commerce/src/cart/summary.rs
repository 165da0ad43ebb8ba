//! Derived cart totals for display.

use crate::cart::CartState;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Storefront free-shipping threshold ($25.00).
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Money = Money::new(2500);

/// Display totals derived from a [`CartState`].
///
/// No tax or shipping cost is computed; the threshold only drives the
/// "free shipping" hint in the cart panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSummary {
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of quantities.
    pub item_count: i64,
    /// Cart total.
    pub total: Money,
    /// Total at which shipping becomes free.
    pub free_shipping_threshold: Money,
    /// Whether the total reaches the threshold.
    pub qualifies_for_free_shipping: bool,
    /// Amount still needed for free shipping (zero once qualified).
    pub remaining_for_free_shipping: Money,
}

impl CartSummary {
    /// Build a summary from state.
    pub fn from_state(state: &CartState, free_shipping_threshold: Money) -> Self {
        let total = state.total();
        Self {
            line_count: state.line_count(),
            item_count: state.item_count(),
            total,
            free_shipping_threshold,
            qualifies_for_free_shipping: total >= free_shipping_threshold,
            remaining_for_free_shipping: free_shipping_threshold.saturating_sub_to_zero(total),
        }
    }

    /// Badge text for the cart icon (e.g., "3" or "99+").
    pub fn badge(&self) -> Option<String> {
        match self.item_count {
            n if n <= 0 => None,
            n if n > 99 => Some("99+".to_string()),
            n => Some(n.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, LineInput};

    fn state_with(cents: i64, quantity: i64) -> CartState {
        let mut state = CartState::new();
        state.apply(CartAction::Add(LineInput::new("p1", "P", Money::new(cents))));
        state.apply(CartAction::UpdateQuantity {
            id: "p1".into(),
            quantity,
        });
        state
    }

    #[test]
    fn test_below_threshold() {
        let summary = state_with(1000, 2).summary(DEFAULT_FREE_SHIPPING_THRESHOLD);
        assert_eq!(summary.total, Money::new(2000));
        assert!(!summary.qualifies_for_free_shipping);
        assert_eq!(summary.remaining_for_free_shipping.display(), "$5.00");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let summary = state_with(2500, 1).summary(DEFAULT_FREE_SHIPPING_THRESHOLD);
        assert!(summary.qualifies_for_free_shipping);
        assert_eq!(summary.remaining_for_free_shipping, Money::zero());
    }

    #[test]
    fn test_badge() {
        assert_eq!(CartState::new().summary(Money::zero()).badge(), None);
        assert_eq!(state_with(100, 3).summary(Money::zero()).badge().as_deref(), Some("3"));
        assert_eq!(state_with(100, 150).summary(Money::zero()).badge().as_deref(), Some("99+"));
    }
}
