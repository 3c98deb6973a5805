//! In-memory dataset registry
//!
//! A process-lifetime mapping from a user-chosen name to a loaded
//! [`DataFrame`]. The store is created once by the embedding application and
//! handed to every tool as an `Arc<DatasetStore>`; nothing here is global.
//! Entries are created by `load_csv` (silently replacing any prior value),
//! rewritten in place only by `clean_column_names`, and read by everything
//! else. No entry is ever removed during a session, and nothing survives a
//! process restart.

use parking_lot::RwLock;
use polars::prelude::DataFrame;
use std::collections::HashMap;

/// Shared registry of loaded datasets, keyed by name.
#[derive(Default)]
pub struct DatasetStore {
    frames: RwLock<HashMap<String, DataFrame>>,
}

impl DatasetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dataset under `name`, returning the replaced frame if the
    /// name was already taken.
    pub fn insert(&self, name: impl Into<String>, frame: DataFrame) -> Option<DataFrame> {
        self.frames.write().insert(name.into(), frame)
    }

    /// Get a dataset by name.
    ///
    /// Returns a clone; `DataFrame` column buffers are refcounted, so this is
    /// cheap and keeps readers independent of later in-place renames.
    pub fn get(&self, name: &str) -> Option<DataFrame> {
        self.frames.read().get(name).cloned()
    }

    /// Check whether a dataset is loaded
    pub fn contains(&self, name: &str) -> bool {
        self.frames.read().contains_key(name)
    }

    /// Names of all loaded datasets, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frames.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of loaded datasets
    pub fn len(&self) -> usize {
        self.frames.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.frames.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample() -> DataFrame {
        df!("id" => [1i64, 2, 3], "name" => ["a", "b", "c"]).unwrap()
    }

    #[test]
    fn insert_and_get() {
        let store = DatasetStore::new();
        assert!(store.is_empty());
        assert!(store.insert("sales", sample()).is_none());

        let frame = store.get("sales").expect("dataset should be loaded");
        assert_eq!(frame.shape(), (3, 2));
        assert!(store.contains("sales"));
        assert!(!store.contains("other"));
    }

    #[test]
    fn insert_overwrites_instead_of_duplicating() {
        let store = DatasetStore::new();
        store.insert("sales", sample());
        let replaced = store.insert("sales", df!("x" => [1i64]).unwrap());

        assert!(replaced.is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("sales").unwrap().shape(), (1, 1));
    }

    #[test]
    fn names_are_sorted() {
        let store = DatasetStore::new();
        store.insert("zeta", sample());
        store.insert("alpha", sample());
        assert_eq!(store.names(), vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn get_returns_independent_clone() {
        let store = DatasetStore::new();
        store.insert("sales", sample());

        let mut copy = store.get("sales").unwrap();
        copy.set_column_names(["a", "b"]).unwrap();

        // The stored frame keeps its original labels
        let stored = store.get("sales").unwrap();
        assert_eq!(stored.get_column_names_str(), vec!["id", "name"]);
    }
}
