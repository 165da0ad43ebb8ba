//! Cart snapshot persistence.
//!
//! The store itself keeps nothing beyond the session. An outer layer
//! saves [`CartSnapshot`]s through a [`SnapshotStore`] and later feeds
//! them back with [`CartStore::hydrate`](crate::cart::CartStore::hydrate).
//!
//! # Example
//!
//! ```rust
//! use qeirex_commerce::prelude::*;
//! use qeirex_commerce::snapshot_key;
//!
//! let mut snapshots = MemorySnapshotStore::new();
//! let key = snapshot_key!("cart", "session-1");
//!
//! let mut store = CartStore::new();
//! store.add(LineInput::new("prod_1", "Coffee Blend", Money::new(2299)));
//! snapshots.save(&key, &store.snapshot())?;
//!
//! let mut restored = CartStore::new();
//! if let Some(snapshot) = snapshots.load(&key)? {
//!     restored.hydrate(snapshot)?;
//! }
//! assert_eq!(restored.total(), Money::new(2299));
//! # Ok::<(), CommerceError>(())
//! ```

mod snapshot;
mod store;

pub use snapshot::{CartSnapshot, SNAPSHOT_VERSION};
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};

/// Helper to build snapshot keys with namespacing.
///
/// ```rust
/// use qeirex_commerce::snapshot_key;
/// assert_eq!(snapshot_key!("cart", "user123"), "cart:user123");
/// ```
#[macro_export]
macro_rules! snapshot_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
