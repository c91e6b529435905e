//! Core types and traits for Shortlist.
//!
//! This crate provides the link record model, the error taxonomy and the
//! seams shared by the remote service client and the local link store.

pub mod clock;
pub mod error;
pub mod link;
pub mod service;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ClientError, ConfigError, LinkError, StorageError};
pub use link::{LinkId, LinkRecord, MintedLink};
pub use service::LinkService;
pub use storage::KeyValueStore;
