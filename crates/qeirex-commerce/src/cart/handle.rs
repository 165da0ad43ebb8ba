//! Shared handle to a root-owned cart store.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cart::{CartAction, CartState, CartStore, SubscriptionId};

/// Cloneable single-threaded handle to a [`CartStore`].
///
/// The application's root context creates one store and hands clones of
/// this handle to the views that need it. The handle is `!Send`, matching
/// the single UI thread the store lives on.
///
/// Listeners run after the mutable borrow is released, so a listener may
/// read through its own clone of the handle. It must not dispatch,
/// subscribe or unsubscribe while being notified; the store is borrowed
/// for the duration of the notification and those calls panic.
#[derive(Debug, Clone, Default)]
pub struct CartHandle {
    inner: Rc<RefCell<CartStore>>,
}

impl CartHandle {
    /// Wrap a store.
    pub fn new(store: CartStore) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    /// Dispatch an action. Returns true if the state changed.
    pub fn dispatch(&self, action: CartAction) -> bool {
        self.update(|store| store.dispatch(action))
    }

    /// Read from the store.
    pub fn read<R>(&self, f: impl FnOnce(&CartStore) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Mutate the store through its own methods.
    ///
    /// Listeners are notified once after `f` returns, if anything changed.
    pub fn update<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> R {
        let (result, pending) = {
            let mut store = self.inner.borrow_mut();
            store.defer_notifications();
            let result = f(&mut store);
            (result, store.take_pending_listeners())
        };

        if let Some(mut listeners) = pending {
            {
                let store = self.inner.borrow();
                for (_, listener) in listeners.iter_mut() {
                    listener(store.state());
                }
            }
            self.inner.borrow_mut().restore_listeners(listeners);
        }
        result
    }

    /// Clone of the current state.
    pub fn state(&self) -> CartState {
        self.read(|store| store.state().clone())
    }

    /// Register a listener.
    pub fn subscribe(&self, listener: impl FnMut(&CartState) + 'static) -> SubscriptionId {
        self.inner.borrow_mut().subscribe(listener)
    }

    /// Remove a listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().unsubscribe(id)
    }

    /// Check whether two handles point at the same store.
    pub fn same_store(&self, other: &CartHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<CartStore> for CartHandle {
    fn from(store: CartStore) -> Self {
        Self::new(store)
    }
}
