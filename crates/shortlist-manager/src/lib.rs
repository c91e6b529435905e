//! Link record lifecycle.
//!
//! [`LinkManager`] ties a [`LinkService`](shortlist_core::LinkService) to a
//! [`LinkStore`](shortlist_storage::LinkStore): create calls the service and
//! appends on success, delete removes locally first and then tells the
//! service. Core types are re-exported from `shortlist_core`.

pub mod manager;

pub use manager::{DeleteOutcome, LinkManager};
pub use shortlist_core::{ClientError, LinkError, LinkId, LinkRecord, StorageError};
