use thiserror::Error;

/// Errors returned by the remote link service client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("url cannot be empty")]
    EmptyUrl,
    #[error("unexpected response from link service: {0}")]
    Validation(String),
    #[error("link service unreachable: {0}")]
    Network(String),
    #[error("link service returned status {status}: {body}")]
    Service { status: u16, body: String },
}

impl ClientError {
    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Errors raised while reading or writing durable local storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("storage io failed: {0}")]
    Io(String),
    #[error("storage quota exceeded for key '{key}': {size} bytes over a {limit} byte limit")]
    QuotaExceeded {
        key: String,
        limit: usize,
        size: usize,
    },
    #[error("storage serialization failed: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("link service base host is not configured")]
    MissingBaseHost,
    #[error("invalid link service base host: {0}")]
    InvalidBaseHost(String),
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Errors surfaced by the link lifecycle flows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
