use dashmap::DashMap;
use shortlist_core::{KeyValueStore, StorageError};
use std::sync::Arc;

type Result<T> = std::result::Result<T, StorageError>;

/// In-memory implementation of [`KeyValueStore`] using DashMap.
///
/// Clones share the same entries, so a test can hand one clone to a
/// [`LinkStore`](crate::LinkStore) and inspect the raw values through another.
///
/// An optional quota bounds the size in bytes of any single value, which
/// mirrors the write failures a browser raises when local storage is full.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<DashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryStore {
    /// Creates an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects values larger than `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota: Some(limit),
        }
    }

    /// Creates a store pre-populated with a single entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                    size: value.len(),
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
