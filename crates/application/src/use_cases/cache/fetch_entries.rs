use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::ports::CacheEngine;

/// Multi-key read through the cache engine.
///
/// A key that fails to load is logged and left out of the result; other keys
/// are unaffected. Empty values are left out as well.
pub struct FetchCacheEntriesUseCase {
    engine: Arc<dyn CacheEngine>,
}

impl FetchCacheEntriesUseCase {
    pub fn new(engine: Arc<dyn CacheEngine>) -> Self {
        Self { engine }
    }

    #[instrument(skip(self, keys), fields(group = self.engine.name(), keys = keys.len()))]
    pub async fn execute(&self, keys: &[String]) -> HashMap<String, Bytes> {
        let mut data = HashMap::with_capacity(keys.len());

        for key in keys {
            match self.engine.get(key).await {
                Ok(value) if !value.is_empty() => {
                    data.insert(key.clone(), value);
                }
                Ok(_) => debug!(key = %key, "Skipping empty cache value"),
                Err(e) => error!(key = %key, error = %e, "Failed fetching data from cache"),
            }
        }

        data
    }
}
