use async_trait::async_trait;
use ferrous_galaxy_domain::{DomainError, PeerSet};

/// Expands configured peer addresses (static or DNS service discovery) into
/// concrete addresses.
#[async_trait]
pub trait PeerResolver: Send + Sync {
    async fn resolve(&self, addresses: &[String]) -> Result<PeerSet, DomainError>;
}
