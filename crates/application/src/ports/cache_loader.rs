use async_trait::async_trait;
use ferrous_galaxy_domain::{CacheEntryEnvelope, DomainError};
use tokio_util::sync::CancellationToken;

/// Callback the cache engine invokes when a key is missing cluster-wide.
#[async_trait]
pub trait CacheLoader: Send + Sync {
    async fn load(
        &self,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<CacheEntryEnvelope, DomainError>;
}
