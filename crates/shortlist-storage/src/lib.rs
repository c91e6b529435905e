//! Durable local storage for short-link records.
//!
//! [`LinkStore`] owns the collection of link records and rewrites it as a
//! single JSON array under one storage key after every mutation. The
//! key-value backends in this crate are the places that JSON lands.

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use shortlist_core::{KeyValueStore, StorageError};
pub use store::{LinkStore, Removal, Snapshot, DEFAULT_STORAGE_KEY};
