use async_trait::async_trait;
use bytes::Bytes;
use ferrous_galaxy_domain::DomainError;

/// Read side of the distributed cache.
#[async_trait]
pub trait CacheEngine: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the cached value for `key`, loading it on a miss.
    async fn get(&self, key: &str) -> Result<Bytes, DomainError>;
}
