use crate::error::ClientError;
use crate::link::{LinkId, MintedLink};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ClientError>;

/// A remote shortening service.
///
/// Implementations are stateless request/response mappers: they never touch
/// the local link store.
#[async_trait]
pub trait LinkService: Send + Sync + 'static {
    /// Asks the service to mint a short link for `original_url`.
    ///
    /// The returned link is only produced after the service response has
    /// been validated. Stamping it with a creation time is left to whoever
    /// stores it.
    async fn create(&self, original_url: &str) -> Result<MintedLink>;

    /// Asks the service to forget the short link `id`.
    async fn remove(&self, id: &LinkId) -> Result<()>;
}
