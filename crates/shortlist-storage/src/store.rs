use parking_lot::Mutex;
use shortlist_core::{KeyValueStore, LinkId, LinkRecord, StorageError};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

type Result<T> = std::result::Result<T, StorageError>;

/// The storage key the link collection lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "shortLinks";

/// A read-only view of the link collection at one point in time.
pub type Snapshot = Arc<[LinkRecord]>;

/// What a [`LinkStore::remove`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The record that was taken out, if the id was stored.
    pub removed: Option<LinkRecord>,
    /// The collection after the removal.
    pub links: Vec<LinkRecord>,
}

/// The local link store.
///
/// Owns the ordered collection of [`LinkRecord`]s and its persisted form.
/// The whole collection is serialized as one JSON array under a single key
/// and rewritten on every mutation.
///
/// Each mutation runs inside one critical section covering
/// read-modify-persist, and the in-memory collection is only replaced once
/// the write has succeeded. A failed write therefore leaves both the memory
/// and the persisted copy untouched.
///
/// Readers that want to re-render on change hold a [`watch::Receiver`] from
/// [`LinkStore::subscribe`]; nothing outside the store mutates the collection.
#[derive(Debug)]
pub struct LinkStore<S> {
    storage: S,
    key: String,
    links: Mutex<Vec<LinkRecord>>,
    snapshot: watch::Sender<Snapshot>,
}

impl<S: KeyValueStore> LinkStore<S> {
    /// Opens the store under [`DEFAULT_STORAGE_KEY`].
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Opens the store, reading the collection persisted under `key`.
    ///
    /// Fails only if the backend can never write `key`. Missing or malformed
    /// persisted data yields an empty collection.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        storage.validate_key(&key)?;

        let links = read_persisted(&storage, &key);
        let (snapshot, _) = watch::channel(Snapshot::from(links.clone()));

        Ok(Self {
            storage,
            key,
            links: Mutex::new(links),
            snapshot,
        })
    }

    /// Re-reads the persisted collection and makes it the current one.
    ///
    /// Records come back in persisted (insertion) order. Malformed or
    /// unreadable data is treated as "no links yet" and never fails.
    pub fn load(&self) -> Vec<LinkRecord> {
        let mut links = self.links.lock();
        *links = read_persisted(&self.storage, &self.key);
        self.publish(&links);
        links.clone()
    }

    /// Returns the current collection without touching storage.
    pub fn list(&self) -> Vec<LinkRecord> {
        self.links.lock().clone()
    }

    /// Looks up a single record by id.
    pub fn get(&self, id: &LinkId) -> Option<LinkRecord> {
        self.links.lock().iter().find(|link| &link.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.links.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.lock().is_empty()
    }

    /// Appends `record` to the end of the collection and persists it.
    ///
    /// A record whose id is already present is ignored and the collection
    /// is returned unchanged, so a retried create never duplicates an entry.
    pub fn append(&self, record: LinkRecord) -> Result<Vec<LinkRecord>> {
        let mut links = self.links.lock();

        if links.iter().any(|link| link.id == record.id) {
            warn!(id = %record.id, "ignoring append of a link id that is already stored");
            return Ok(links.clone());
        }

        let mut updated = links.clone();
        updated.push(record);
        self.persist(&updated)?;

        debug!(count = updated.len(), "appended link record");
        *links = updated;
        self.publish(&links);
        Ok(links.clone())
    }

    /// Removes the record with `id` and persists the remaining collection.
    ///
    /// Removing an id that is not present is a no-op and does not write.
    pub fn remove(&self, id: &LinkId) -> Result<Removal> {
        let mut links = self.links.lock();

        let Some(position) = links.iter().position(|link| &link.id == id) else {
            trace!(id = %id, "remove of unknown link id");
            return Ok(Removal {
                removed: None,
                links: links.clone(),
            });
        };

        let mut updated = links.clone();
        let removed = updated.remove(position);
        self.persist(&updated)?;

        debug!(id = %id, count = updated.len(), "removed link record");
        *links = updated;
        self.publish(&links);
        Ok(Removal {
            removed: Some(removed),
            links: links.clone(),
        })
    }

    /// Subscribes to collection changes.
    ///
    /// The receiver always holds the latest snapshot; it is updated after
    /// every successful mutation and every [`load`](Self::load).
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    /// Returns the underlying key-value store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the storage key the collection is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self, links: &[LinkRecord]) -> Result<()> {
        let serialized =
            serde_json::to_string(links).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &serialized)
    }

    fn publish(&self, links: &[LinkRecord]) {
        self.snapshot.send_replace(Snapshot::from(links));
    }
}

fn read_persisted<S: KeyValueStore>(storage: &S, key: &str) -> Vec<LinkRecord> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read persisted links, starting empty");
            return Vec::new();
        }
    };

    let links: Vec<LinkRecord> = match serde_json::from_str(&raw) {
        Ok(links) => links,
        Err(e) => {
            warn!(key, error = %e, "persisted links are malformed, starting empty");
            return Vec::new();
        }
    };

    // Ids are unique in the collection; the first occurrence wins.
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| {
            let first = seen.insert(link.id.clone());
            if !first {
                warn!(key, id = %link.id, "dropping persisted link with a repeated id");
            }
            first
        })
        .collect()
}
