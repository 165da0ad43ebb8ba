//! Persisted cart form.

use crate::cart::CartLineItem;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Items of a cart as saved between sessions.
///
/// Panel visibility is UI intent and is not part of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    /// Format version.
    pub version: u32,
    /// Line items in display order.
    pub items: Vec<CartLineItem>,
}

impl CartSnapshot {
    /// Create a snapshot at the current version.
    pub fn new(items: Vec<CartLineItem>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            items,
        }
    }

    /// Ensure this snapshot can be hydrated.
    pub fn check_version(&self) -> Result<(), CommerceError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CommerceError::UnsupportedSnapshotVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for CartSnapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
