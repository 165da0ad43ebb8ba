//! Cart actions.

use crate::cart::{CartLineItem, LineInput};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Every way the cart can be changed.
///
/// Actions serialize with an internal `type` tag so that recorded sessions
/// can be replayed:
///
/// ```json
/// [
///   {"type": "add", "id": "prod_1", "name": "Coffee Blend", "price": 22.99},
///   {"type": "update_quantity", "id": "prod_1", "quantity": 3},
///   {"type": "open"}
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    /// Add one unit of a product, or append a new line.
    Add(LineInput),
    /// Remove a line by product id.
    Remove { id: ProductId },
    /// Set a line's quantity; zero or less removes the line.
    UpdateQuantity { id: ProductId, quantity: i64 },
    /// Flip panel visibility.
    ToggleOpen,
    /// Show the cart panel.
    Open,
    /// Hide the cart panel.
    Close,
    /// Remove every line.
    Clear,
    /// Replace all lines wholesale.
    Initialize { items: Vec<CartLineItem> },
}

impl CartAction {
    /// Short action name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::Add(_) => "add",
            CartAction::Remove { .. } => "remove",
            CartAction::UpdateQuantity { .. } => "update_quantity",
            CartAction::ToggleOpen => "toggle_open",
            CartAction::Open => "open",
            CartAction::Close => "close",
            CartAction::Clear => "clear",
            CartAction::Initialize { .. } => "initialize",
        }
    }

    /// Whether this action can change items or total.
    pub fn touches_items(&self) -> bool {
        !matches!(
            self,
            CartAction::ToggleOpen | CartAction::Open | CartAction::Close
        )
    }
}

impl From<LineInput> for CartAction {
    fn from(input: LineInput) -> Self {
        CartAction::Add(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_action_json_format() {
        let actions: Vec<CartAction> = serde_json::from_str(
            r#"[
                {"type": "add", "id": "prod_1", "name": "Coffee Blend", "price": 22.99},
                {"type": "update_quantity", "id": "prod_1", "quantity": 3},
                {"type": "remove", "id": "prod_2"},
                {"type": "toggle_open"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            actions[0],
            CartAction::Add(LineInput::new("prod_1", "Coffee Blend", Money::new(2299)))
        );
        assert_eq!(
            actions[1],
            CartAction::UpdateQuantity {
                id: ProductId::new("prod_1"),
                quantity: 3
            }
        );
        assert_eq!(actions[3].name(), "toggle_open");
    }

    #[test]
    fn test_visibility_actions_do_not_touch_items() {
        assert!(!CartAction::Open.touches_items());
        assert!(!CartAction::ToggleOpen.touches_items());
        assert!(CartAction::Clear.touches_items());
    }
}
