use shortlist_core::{
    ClientError, Clock, KeyValueStore, LinkError, LinkId, LinkRecord, LinkService, SystemClock,
};
use shortlist_storage::{LinkStore, Removal, Snapshot};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

type Result<T> = std::result::Result<T, LinkError>;

/// Result of a delete flow.
///
/// The local removal has already happened and been persisted by the time
/// this is returned. `remote` carries what the service said; a failure there
/// is not rolled back or retried, so the local collection and the service
/// may disagree about `removed` afterwards.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    /// The collection after the local removal.
    pub links: Vec<LinkRecord>,
    /// The record that was removed locally, if it was stored.
    pub removed: Option<LinkRecord>,
    /// Outcome of the remote delete request.
    pub remote: std::result::Result<(), ClientError>,
}

impl DeleteOutcome {
    /// Returns `true` if the service confirmed the delete.
    pub fn is_synced(&self) -> bool {
        self.remote.is_ok()
    }
}

/// Drives the create, list and delete flows of short-link records.
///
/// The manager owns no state of its own: the [`LinkStore`] is the single
/// owner of the collection and the [`LinkService`] is a stateless mapper.
/// Records are stamped from the manager's [`Clock`] as they are appended.
/// Cloning a manager shares all three.
///
/// Concurrent creates are not de-duplicated; two identical submissions in
/// flight produce two remote links. Appends land in the order their create
/// calls complete.
pub struct LinkManager<S, K, C = SystemClock> {
    service: Arc<S>,
    store: Arc<LinkStore<K>>,
    clock: Arc<C>,
}

impl<S, K, C> Clone for LinkManager<S, K, C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: LinkService, K: KeyValueStore> LinkManager<S, K> {
    pub fn new(service: S, store: LinkStore<K>) -> Self {
        Self::with_clock(service, store, SystemClock)
    }
}

impl<S: LinkService, K: KeyValueStore, C: Clock> LinkManager<S, K, C> {
    /// Creates a manager that stamps `created_at` from `clock`.
    pub fn with_clock(service: S, store: LinkStore<K>, clock: C) -> Self {
        Self {
            service: Arc::new(service),
            store: Arc::new(store),
            clock: Arc::new(clock),
        }
    }

    /// Shortens `original_url` and stores the resulting record.
    ///
    /// The store is only touched once the service response has been
    /// validated; any client error leaves it unchanged. If the service
    /// returns an id that is already stored, the existing record is kept
    /// and returned.
    pub async fn create(&self, original_url: &str) -> Result<LinkRecord> {
        let minted = self.service.create(original_url).await?;
        let record = minted.into_record(self.clock.now());
        let id = record.id.clone();

        if let Err(e) = self.store.append(record.clone()) {
            warn!(id = %id, error = %e, "short link created remotely but could not be stored");
            return Err(e.into());
        }

        info!(id = %id, short_url = %record.short_url, "short link created");
        Ok(self.store.get(&id).unwrap_or(record))
    }

    /// Returns the current collection in insertion order.
    pub fn list(&self) -> Vec<LinkRecord> {
        self.store.list()
    }

    /// Re-reads the collection from storage.
    pub fn reload(&self) -> Vec<LinkRecord> {
        self.store.load()
    }

    /// Removes `id` locally, then asks the service to delete it.
    ///
    /// Fails only if the local removal cannot be persisted, in which case
    /// the service is not contacted. A failed remote delete is reported in
    /// [`DeleteOutcome::remote`] and the local removal stands.
    pub async fn delete(&self, id: &LinkId) -> Result<DeleteOutcome> {
        let Removal { removed, links } = self.store.remove(id)?;

        let remote = self.service.remove(id).await;
        match &remote {
            Ok(()) => info!(id = %id, "short link deleted"),
            Err(e) => warn!(
                id = %id,
                error = %e,
                "remote delete failed, local removal is kept"
            ),
        }

        Ok(DeleteOutcome {
            links,
            removed,
            remote,
        })
    }

    /// Subscribes to collection snapshots for rendering.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.store.subscribe()
    }

    pub fn store(&self) -> &LinkStore<K> {
        &self.store
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
