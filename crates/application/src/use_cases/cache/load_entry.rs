use async_trait::async_trait;
use bytes::Bytes;
use ferrous_galaxy_domain::config::UnconfiguredPathAction;
use ferrous_galaxy_domain::{
    CacheEntryEnvelope, CacheKeyDescriptor, CachingPolicy, DomainError, Operation, OperationTtl,
};
use futures::TryStreamExt;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

use crate::ports::{CacheLoader, ObjectReader, ObjectStore};

/// Read-through loader registered with the cache engine.
///
/// Turns a bucket cache key into exactly one object store call and stamps
/// the serialized result with the TTL configured for that operation and
/// path. Nothing is cached here; the engine stores the returned envelope.
///
/// Payloads per operation:
/// - `attrs`: JSON `{"Size":..,"LastModified":..}`
/// - `iter`: JSON array of names, in backend order
/// - `content`: raw object bytes
/// - `exists`: `true` / `false`
/// - `subrange`: raw bytes of `[start, end)`
pub struct LoadCacheEntryUseCase {
    store: Arc<dyn ObjectStore>,
    policy: Arc<CachingPolicy>,
    on_unconfigured_path: UnconfiguredPathAction,
}

impl LoadCacheEntryUseCase {
    pub fn new(store: Arc<dyn ObjectStore>, policy: Arc<CachingPolicy>) -> Self {
        Self {
            store,
            policy,
            on_unconfigured_path: UnconfiguredPathAction::default(),
        }
    }

    pub fn with_unconfigured_path_action(mut self, action: UnconfiguredPathAction) -> Self {
        self.on_unconfigured_path = action;
        self
    }

    /// Loads the value behind `key`.
    ///
    /// # Errors
    ///
    /// * `InvalidCacheKey` / `UnknownOperation` / `InvalidRange` - malformed key
    /// * `UnconfiguredPath` - no rule caches this operation for this path;
    ///   the backend is not contacted
    /// * `Backend` - the object store call or the body read failed
    /// * `LoadCancelled` - `cancel` fired before the load finished
    #[instrument(skip(self, cancel), fields(store = self.store.name()))]
    pub async fn execute(
        &self,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<CacheEntryEnvelope, DomainError> {
        let descriptor = CacheKeyDescriptor::parse(key).inspect_err(|e| {
            warn!(error = %e, "Rejecting malformed cache key");
        })?;

        let ttl = self.resolve_ttl(&descriptor)?;

        // The backend future is dropped on cancellation, which releases any
        // open object stream with it.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Load cancelled");
                Err(DomainError::LoadCancelled(key.to_string()))
            }
            result = self.dispatch(&descriptor, ttl) => {
                if let Err(ref e) = result {
                    warn!(error = %e, "Backend load failed");
                }
                result
            }
        }
    }

    fn resolve_ttl(&self, key: &CacheKeyDescriptor) -> Result<OperationTtl, DomainError> {
        match self.policy.resolve(key.operation(), key.name()) {
            Some(resolved) => {
                debug!(rule = resolved.rule, operation = %key.operation(), "Caching rule matched");
                Ok(resolved.ttl)
            }
            None => {
                error!(
                    operation = %key.operation(),
                    name = key.name(),
                    action = ?self.on_unconfigured_path,
                    "Caching layer called the loader on an unconfigured path"
                );
                if self.on_unconfigured_path == UnconfiguredPathAction::Abort {
                    std::process::abort();
                }
                Err(DomainError::UnconfiguredPath {
                    operation: key.operation().to_string(),
                    name: key.name().to_string(),
                })
            }
        }
    }

    async fn dispatch(
        &self,
        key: &CacheKeyDescriptor,
        ttl: OperationTtl,
    ) -> Result<CacheEntryEnvelope, DomainError> {
        let name = key.name();
        let operation = key.operation();
        let backend = |e| backend_error(operation, name, e);

        match operation {
            Operation::Attributes => {
                let attrs = self.store.attributes(name).await.map_err(backend)?;
                let payload = serde_json::to_vec(&attrs)
                    .map_err(|e| DomainError::Serialization(e.to_string()))?;
                CacheEntryEnvelope::expiring_in(payload, ttl.single())
            }
            Operation::List => {
                let names: Vec<String> = self.store.iter(name).try_collect().await.map_err(backend)?;
                let payload = serde_json::to_vec(&names)
                    .map_err(|e| DomainError::Serialization(e.to_string()))?;
                CacheEntryEnvelope::expiring_in(payload, ttl.single())
            }
            Operation::Content => {
                let reader = self.store.get(name).await.map_err(backend)?;
                let body = read_all(reader, operation, name).await?;
                CacheEntryEnvelope::expiring_in(body, ttl.single())
            }
            Operation::Exists => {
                let exists = self.store.exists(name).await.map_err(backend)?;
                let payload = if exists {
                    Bytes::from_static(b"true")
                } else {
                    Bytes::from_static(b"false")
                };
                CacheEntryEnvelope::expiring_in(payload, ttl.for_existence(exists))
            }
            Operation::Subrange => {
                let range = key.range().ok_or_else(|| {
                    DomainError::InvalidRange(format!("subrange key without range: {}", key))
                })?;
                let reader = self
                    .store
                    .get_range(name, range.start(), range.len())
                    .await
                    .map_err(backend)?;
                let body = read_all(reader, operation, name).await?;
                CacheEntryEnvelope::expiring_in(body, ttl.single())
            }
        }
    }
}

#[async_trait]
impl CacheLoader for LoadCacheEntryUseCase {
    async fn load(
        &self,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<CacheEntryEnvelope, DomainError> {
        self.execute(key, cancel).await
    }
}

/// Reads the stream to completion. The reader is dropped on return, on
/// success and on error alike.
async fn read_all(
    mut reader: ObjectReader,
    operation: Operation,
    name: &str,
) -> Result<Vec<u8>, DomainError> {
    let mut body = Vec::new();
    reader
        .read_to_end(&mut body)
        .await
        .map_err(|e| DomainError::Backend {
            operation: operation.to_string(),
            name: name.to_string(),
            message: e.to_string(),
        })?;
    Ok(body)
}

fn backend_error(operation: Operation, name: &str, error: DomainError) -> DomainError {
    match error {
        DomainError::Backend { .. } => error,
        other => DomainError::Backend {
            operation: operation.to_string(),
            name: name.to_string(),
            message: other.to_string(),
        },
    }
}
