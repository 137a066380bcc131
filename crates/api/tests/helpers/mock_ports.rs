use async_trait::async_trait;
use bytes::Bytes;
use ferrous_galaxy_api::AppState;
use ferrous_galaxy_application::ports::{CacheEngine, CacheStatsSource, MembershipView};
use ferrous_galaxy_application::use_cases::{FetchCacheEntriesUseCase, GetCacheStatsUseCase};
use ferrous_galaxy_domain::{DomainError, GalaxyStats, PeerSet};
use prometheus::{IntCounter, Registry};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct MockCacheEngine {
    values: HashMap<String, Result<Bytes, DomainError>>,
}

impl MockCacheEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &[u8]) -> Self {
        self.values
            .insert(key.to_string(), Ok(Bytes::copy_from_slice(value)));
        self
    }

    pub fn with_error(mut self, key: &str, error: DomainError) -> Self {
        self.values.insert(key.to_string(), Err(error));
        self
    }
}

#[async_trait]
impl CacheEngine for MockCacheEngine {
    fn name(&self) -> &str {
        "galaxy"
    }

    async fn get(&self, key: &str) -> Result<Bytes, DomainError> {
        self.values.get(key).cloned().unwrap_or_else(|| {
            Err(DomainError::Backend {
                operation: "get".to_string(),
                name: key.to_string(),
                message: "not found".to_string(),
            })
        })
    }
}

pub struct FixedStats(pub GalaxyStats);

impl CacheStatsSource for FixedStats {
    fn stats(&self) -> GalaxyStats {
        self.0
    }
}

pub struct FixedMembership(pub PeerSet);

impl MembershipView for FixedMembership {
    fn set_peers(&self, _peers: PeerSet) -> Result<(), DomainError> {
        Ok(())
    }

    fn peers(&self) -> PeerSet {
        self.0.clone()
    }
}

pub fn create_test_state(engine: MockCacheEngine, stats: GalaxyStats, peers: PeerSet) -> AppState {
    let engine: Arc<dyn CacheEngine> = Arc::new(engine);

    let registry = Registry::new();
    let probe = IntCounter::new("galaxy_test_probe_total", "Probe counter").unwrap();
    probe.inc();
    registry.register(Box::new(probe)).unwrap();

    AppState {
        engine: Arc::clone(&engine),
        get_stats: Arc::new(GetCacheStatsUseCase::new(Arc::new(FixedStats(stats)))),
        fetch_entries: Arc::new(FetchCacheEntriesUseCase::new(engine)),
        membership: Arc::new(FixedMembership(peers)),
        registry: Arc::new(registry),
    }
}
