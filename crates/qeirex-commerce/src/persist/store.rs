//! Snapshot storage backends.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::CommerceError;
use crate::persist::CartSnapshot;
use tracing::{debug, info};

/// Key-value storage for cart snapshots.
pub trait SnapshotStore {
    /// Load a snapshot. Returns `None` if the key doesn't exist.
    fn load(&self, key: &str) -> Result<Option<CartSnapshot>, CommerceError>;

    /// Save a snapshot, replacing any previous value.
    fn save(&mut self, key: &str, snapshot: &CartSnapshot) -> Result<(), CommerceError>;

    /// Delete a snapshot. Returns false if the key didn't exist.
    fn delete(&mut self, key: &str) -> Result<bool, CommerceError>;
}

/// Snapshots kept in memory. Useful in tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: HashMap<String, String>,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no snapshots are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<CartSnapshot>, CommerceError> {
        self.entries
            .get(key)
            .map(|json| CartSnapshot::from_json(json))
            .transpose()
    }

    fn save(&mut self, key: &str, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        // Stored as JSON so both backends exercise the same encoding.
        self.entries.insert(key.to_string(), snapshot.to_json()?);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, CommerceError> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Snapshots stored as one JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Use `dir` for snapshot files. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory snapshots are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path used for a key.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<CartSnapshot>, CommerceError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(json) => {
                debug!(key, path = %path.display(), "loaded cart snapshot");
                CartSnapshot::from_json(&json).map(Some)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, snapshot.to_json()?)?;
        fs::rename(&tmp, &path)?;
        info!(key, path = %path.display(), lines = snapshot.items.len(), "saved cart snapshot");
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, CommerceError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Map a key to a file stem without collisions: bytes outside
/// `[A-Za-z0-9_-]` become `%XX`, and the empty key becomes `%`.
fn file_stem(key: &str) -> String {
    if key.is_empty() {
        return "%".to_string();
    }
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLineItem, LineInput};
    use crate::money::Money;

    fn snapshot() -> CartSnapshot {
        CartSnapshot::new(vec![CartLineItem::from_input(
            LineInput::new("prod_3", "Detoxification Mix", Money::new(2499)),
            2,
        )])
    }

    #[test]
    fn test_file_stem_sanitizes() {
        assert_eq!(file_stem("cart:session-1"), "cart%3Asession-1");
        assert_eq!(file_stem("../etc/passwd"), "%2E%2E%2Fetc%2Fpasswd");
        assert_eq!(file_stem(""), "%");
        assert_eq!(file_stem("%"), "%25");
    }

    #[test]
    fn test_distinct_keys_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSnapshotStore::new(dir.path());
        let keys = ["cart:a b", "cart:a:b", "cart:a_b", "cart_a_b"];
        for key in keys {
            assert!(store.path_for(key).starts_with(dir.path()));
        }

        store.save("cart:a:b", &snapshot()).unwrap();
        for key in ["cart:a b", "cart:a_b", "cart_a_b"] {
            assert!(store.load(key).unwrap().is_none(), "{key} collided");
        }
        assert_eq!(store.load("cart:a:b").unwrap(), Some(snapshot()));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemorySnapshotStore::new();
        assert!(store.load("cart:a").unwrap().is_none());

        store.save("cart:a", &snapshot()).unwrap();
        assert_eq!(store.load("cart:a").unwrap(), Some(snapshot()));
        assert_eq!(store.len(), 1);

        assert!(store.delete("cart:a").unwrap());
        assert!(!store.delete("cart:a").unwrap());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSnapshotStore::new(dir.path().join("carts"));

        assert!(store.load("cart:default").unwrap().is_none());
        store.save("cart:default", &snapshot()).unwrap();
        assert!(store.path_for("cart:default").ends_with("cart%3Adefault.json"));
        assert_eq!(store.load("cart:default").unwrap(), Some(snapshot()));

        assert!(store.delete("cart:default").unwrap());
        assert!(store.load("cart:default").unwrap().is_none());
    }

    #[test]
    fn test_file_store_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());
        fs::write(store.path_for("bad"), "[]").unwrap();
        assert!(matches!(store.load("bad"), Err(CommerceError::Serialization(_))));
    }
}
