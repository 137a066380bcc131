use async_trait::async_trait;
use ferrous_galaxy_domain::{DomainError, ObjectAttributes};
use futures::stream::BoxStream;
use tokio::io::AsyncRead;

/// Object body handle. Dropping it releases the underlying stream.
pub type ObjectReader = Box<dyn AsyncRead + Send + Unpin>;

/// Lazily produced object names, in backend order.
pub type NameStream<'a> = BoxStream<'a, Result<String, DomainError>>;

/// Object storage capability consumed by the loader.
///
/// Implementations report failures as `DomainError::Backend` so the loader
/// can pass them through unchanged.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn attributes(&self, name: &str) -> Result<ObjectAttributes, DomainError>;

    /// Names directly under the `dir` prefix. Sub-directories end with `/`.
    fn iter<'a>(&'a self, dir: &'a str) -> NameStream<'a>;

    async fn get(&self, name: &str) -> Result<ObjectReader, DomainError>;

    async fn get_range(
        &self,
        name: &str,
        offset: u64,
        length: u64,
    ) -> Result<ObjectReader, DomainError>;

    async fn exists(&self, name: &str) -> Result<bool, DomainError>;

    fn name(&self) -> &str;
}
