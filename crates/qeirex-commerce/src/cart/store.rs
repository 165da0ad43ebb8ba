//! The cart store: single owner of [`CartState`].

use std::fmt;

use crate::cart::{CartAction, CartLineItem, CartState, CartSummary, LineInput};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::persist::CartSnapshot;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

pub(crate) type Listener = Box<dyn FnMut(&CartState)>;

/// In-memory, single-writer cart store.
///
/// All mutation goes through [`CartStore::dispatch`]; the named methods
/// (`add`, `remove`, ...) are shorthands for dispatching the matching
/// [`CartAction`]. Each dispatch is one synchronous step: items change, the
/// total is recomputed, then listeners run if anything changed.
///
/// The store does not validate input. Wrap it in
/// [`ValidatingCart`](crate::cart::ValidatingCart) at the boundary where
/// untrusted data comes in.
pub struct CartStore {
    state: CartState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    deferred: bool,
    pending: bool,
}

impl CartStore {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::with_state(CartState::new())
    }

    /// Create a store around existing state.
    pub fn with_state(state: CartState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_subscription: 0,
            deferred: false,
            pending: false,
        }
    }

    /// Apply an action. Returns true if the state observably changed.
    pub fn dispatch(&mut self, action: CartAction) -> bool {
        let name = action.name();
        let changed = self.state.apply(action);

        debug!(
            action = name,
            changed,
            lines = self.state.line_count(),
            total_cents = self.state.total().amount_cents,
            "cart action"
        );

        if changed {
            if self.deferred {
                self.pending = true;
            } else {
                self.notify();
            }
        }
        changed
    }

    // Actions

    /// Add one unit of a product.
    ///
    /// A repeat add of an existing id only increments its quantity; the
    /// name, price and other fields from the first add are kept.
    pub fn add(&mut self, input: LineInput) -> bool {
        self.dispatch(CartAction::Add(input))
    }

    /// Remove a line. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        self.dispatch(CartAction::Remove { id: id.clone() })
    }

    /// Set a line's quantity. Zero or less removes the line; unknown ids are a no-op.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.clone(),
            quantity,
        })
    }

    /// Flip panel visibility.
    pub fn toggle_open(&mut self) -> bool {
        self.dispatch(CartAction::ToggleOpen)
    }

    /// Show the cart panel.
    pub fn open(&mut self) -> bool {
        self.dispatch(CartAction::Open)
    }

    /// Hide the cart panel.
    pub fn close(&mut self) -> bool {
        self.dispatch(CartAction::Close)
    }

    /// Remove every line. Visibility is unchanged.
    pub fn clear(&mut self) -> bool {
        self.dispatch(CartAction::Clear)
    }

    /// Replace all lines. Visibility is unchanged and nothing is validated.
    pub fn initialize(&mut self, items: Vec<CartLineItem>) -> bool {
        self.dispatch(CartAction::Initialize { items })
    }

    // Selectors

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        self.state.items()
    }

    /// Cart total.
    pub fn total(&self) -> Money {
        self.state.total()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.state.item_count()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.state.line_count()
    }

    /// Whether the cart panel should be shown.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.state.get(id)
    }

    /// Display totals.
    pub fn summary(&self, free_shipping_threshold: Money) -> CartSummary {
        self.state.summary(free_shipping_threshold)
    }

    // Subscriptions

    /// Register a listener called after every dispatch that changes state.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() < len_before
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(state);
        }
    }

    /// Hold notifications until [`take_pending_listeners`](Self::take_pending_listeners).
    pub(crate) fn defer_notifications(&mut self) {
        self.deferred = true;
    }

    /// End deferral. If anything changed meanwhile, lend out the listeners
    /// so the caller can notify them after releasing its borrow.
    pub(crate) fn take_pending_listeners(&mut self) -> Option<Vec<(SubscriptionId, Listener)>> {
        self.deferred = false;
        if !std::mem::take(&mut self.pending) {
            return None;
        }
        Some(std::mem::take(&mut self.listeners))
    }

    /// Return lent-out listeners ahead of any registered since.
    pub(crate) fn restore_listeners(&mut self, mut listeners: Vec<(SubscriptionId, Listener)>) {
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }

    // Persistence

    /// Capture the items for saving. Visibility is not persisted.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.state.items().to_vec())
    }

    /// Replace the items with a saved snapshot via `initialize`.
    pub fn hydrate(&mut self, snapshot: CartSnapshot) -> Result<bool, CommerceError> {
        snapshot.check_version()?;
        Ok(self.initialize(snapshot.items))
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn input(id: &str, cents: i64) -> LineInput {
        LineInput::new(id, format!("Product {}", id), Money::new(cents))
    }

    #[test]
    fn test_store_creation() {
        let store = CartStore::new();
        assert!(store.is_empty());
        assert!(!store.is_open());
        assert_eq!(store.total(), Money::zero());
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut store = CartStore::new();
        store.add(input("p1", 1000));
        store.add(input("p1", 1000));

        assert_eq!(store.line_count(), 1);
        assert_eq!(store.item_count(), 2);
        assert_eq!(store.total(), Money::new(2000));
    }

    #[test]
    fn test_repeat_add_keeps_first_snapshot() {
        let mut store = CartStore::new();
        store.add(input("p1", 1000));
        store.add(LineInput::new("p1", "Renamed", Money::new(99_900)).with_category("BATH"));

        let line = store.get(&ProductId::new("p1")).unwrap();
        assert_eq!(line.name, "Product p1");
        assert_eq!(line.price, Money::new(1000));
        assert_eq!(line.category, None);
        assert_eq!(line.quantity, 2);
        assert_eq!(store.total(), Money::new(2000));
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut store = CartStore::new();
        store.add(input("b", 1));
        store.add(input("a", 1));
        store.add(input("b", 1));
        let ids: Vec<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let mut store = CartStore::new();
        store.add(input("p1", 500));
        store.add(input("p2", 700));
        store.update_quantity(&ProductId::new("p1"), 3);

        assert_eq!(store.get(&ProductId::new("p1")).unwrap().quantity, 3);
        assert_eq!(store.total(), Money::new(2200));
    }

    #[test]
    fn test_update_quantity_non_positive_removes() {
        for quantity in [0, -1, i64::MIN] {
            let mut store = CartStore::new();
            store.add(input("p1", 500));
            assert!(store.update_quantity(&ProductId::new("p1"), quantity));
            assert!(store.is_empty());
            assert_eq!(store.total(), Money::zero());
        }
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut store = CartStore::new();
        store.add(input("p1", 500));
        assert!(!store.update_quantity(&ProductId::new("nope"), 4));
        assert!(!store.update_quantity(&ProductId::new("nope"), 0));
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut store = CartStore::new();
        store.add(input("p1", 500));
        store.add(input("p2", 700));

        assert!(store.remove(&ProductId::new("p1")));
        assert_eq!(store.total(), Money::new(700));
        assert!(!store.remove(&ProductId::new("p1")));
        assert_eq!(store.total(), Money::new(700));
    }

    #[test]
    fn test_clear_keeps_visibility() {
        let mut store = CartStore::new();
        store.add(input("p1", 500));
        store.open();
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.total(), Money::zero());
        assert!(store.is_open());
    }

    #[test]
    fn test_toggle_twice_restores_visibility() {
        let mut store = CartStore::new();
        store.add(input("p1", 500));
        let before = store.state().clone();

        store.toggle_open();
        assert!(store.is_open());
        store.toggle_open();
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_initialize_replaces_items_without_validation() {
        let mut store = CartStore::new();
        store.add(input("old", 100));
        store.open();

        let items = vec![
            CartLineItem::from_input(input("p1", 250), 4),
            CartLineItem::from_input(input("p1", 100), 0),
        ];
        store.initialize(items);

        assert_eq!(store.line_count(), 2);
        assert_eq!(store.total(), Money::new(1000));
        assert!(store.is_open());
    }

    #[test]
    fn test_negative_price_is_accepted() {
        let mut store = CartStore::new();
        store.add(input("refund", -500));
        store.add(input("p1", 1200));
        assert_eq!(store.total(), Money::new(700));
    }

    #[test]
    fn test_subscribers_notified_only_on_change() {
        let mut store = CartStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push(state.total().amount_cents));

        store.add(input("p1", 300));
        store.remove(&ProductId::new("missing"));
        store.close();
        store.add(input("p1", 300));

        assert_eq!(*seen.borrow(), vec![300, 600]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = CartStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.open();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.close();

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_snapshot_round_trip_keeps_visibility() {
        let mut source = CartStore::new();
        source.add(input("p1", 2299));
        source.add(input("p2", 3199));
        source.update_quantity(&ProductId::new("p2"), 2);
        source.open();

        let mut target = CartStore::new();
        assert!(target.hydrate(source.snapshot()).unwrap());
        assert_eq!(target.items(), source.items());
        assert_eq!(target.total(), Money::new(8697));
        assert!(!target.is_open());
    }

    #[test]
    fn test_hydrate_rejects_unknown_version() {
        let mut snapshot = CartStore::new().snapshot();
        snapshot.version = 99;
        let mut store = CartStore::new();
        assert!(matches!(
            store.hydrate(snapshot),
            Err(CommerceError::UnsupportedSnapshotVersion { found: 99, .. })
        ));
    }
}
