use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier minted by the remote link service.
///
/// Ids are opaque non-empty strings. A numeric id in a response or in
/// persisted data is treated as malformed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkId(String);

impl LinkId {
    /// Creates a `LinkId`, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("link id cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LinkId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LinkId> for String {
    fn from(value: LinkId) -> Self {
        value.0
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A short link held in the local link store.
///
/// The serialized form uses the persisted field names `id`, `originalUrl`,
/// `shortUrl` and `createdAt`. Any other field makes the record invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinkRecord {
    /// Identifier assigned by the remote service.
    pub id: LinkId,
    /// The long URL the user submitted.
    pub original_url: String,
    /// The service base host joined with `id`.
    pub short_url: String,
    /// When the record was created locally.
    pub created_at: Timestamp,
}

/// A short link the remote service has just minted, not yet stored.
///
/// It becomes a [`LinkRecord`] once it is stamped with a creation time at
/// the moment it is appended to the local collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedLink {
    pub id: LinkId,
    pub original_url: String,
    pub short_url: String,
}

impl MintedLink {
    pub fn into_record(self, created_at: Timestamp) -> LinkRecord {
        LinkRecord {
            id: self.id,
            original_url: self.original_url,
            short_url: self.short_url,
            created_at,
        }
    }
}
