use async_trait::async_trait;
use bytes::Bytes;
use ferrous_galaxy_application::ports::{
    CacheEngine, CacheLoader, CacheStatsSource, MembershipView,
};
use ferrous_galaxy_domain::{CacheEntryEnvelope, CacheTier, DomainError, GalaxyStats, PeerSet};
use futures::future::{BoxFuture, FutureExt, Shared};
use lru::LruCache;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::membership::PeerMembership;
use super::stats::GalaxyCounters;

type LoadResult = Result<CacheEntryEnvelope, DomainError>;
type InFlightLoad = Shared<BoxFuture<'static, LoadResult>>;

struct MainCache {
    entries: LruCache<String, CacheEntryEnvelope>,
    bytes: u64,
}

impl MainCache {
    fn entry_size(key: &str, entry: &CacheEntryEnvelope) -> u64 {
        (key.len() + entry.len()) as u64
    }

    fn remove(&mut self, key: &str) {
        if let Some(entry) = self.entries.pop(key) {
            self.bytes -= Self::entry_size(key, &entry);
        }
    }

    fn insert(&mut self, key: String, entry: CacheEntryEnvelope, max_size: u64) {
        let size = Self::entry_size(&key, &entry);
        if size > max_size {
            return;
        }
        self.remove(&key);
        self.bytes += size;
        self.entries.put(key, entry);

        while self.bytes > max_size {
            match self.entries.pop_lru() {
                Some((evicted_key, evicted)) => {
                    self.bytes -= Self::entry_size(&evicted_key, &evicted);
                }
                None => break,
            }
        }
    }
}

/// Single-node cache group.
///
/// Concurrent misses on the same key share one loader call. Expired
/// entries are dropped on access.
pub struct LocalGalaxy {
    name: String,
    max_size: u64,
    loader: Arc<dyn CacheLoader>,
    main: Mutex<MainCache>,
    in_flight: Mutex<HashMap<String, InFlightLoad>>,
    counters: GalaxyCounters,
    membership: PeerMembership,
    shutdown: CancellationToken,
}

impl LocalGalaxy {
    pub fn new(
        name: impl Into<String>,
        max_size: u64,
        loader: Arc<dyn CacheLoader>,
        membership: PeerMembership,
    ) -> Self {
        Self {
            name: name.into(),
            max_size,
            loader,
            main: Mutex::new(MainCache {
                entries: LruCache::unbounded(),
                bytes: 0,
            }),
            in_flight: Mutex::new(HashMap::new()),
            counters: GalaxyCounters::default(),
            membership,
            shutdown: CancellationToken::new(),
        }
    }

    /// Loads still running when `token` is cancelled fail with
    /// `LoadCancelled`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn membership(&self) -> &PeerMembership {
        &self.membership
    }

    /// Bytes currently held by the main cache.
    pub fn cached_bytes(&self) -> u64 {
        lock(&self.main).bytes
    }

    pub fn cached_entries(&self) -> usize {
        lock(&self.main).entries.len()
    }

    fn lookup(&self, key: &str) -> Option<Bytes> {
        let mut main = lock(&self.main);
        let expired = match main.entries.get(key) {
            Some(entry) if !entry.is_expired() => return Some(entry.payload.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            main.remove(key);
        }
        None
    }

    fn load_shared(&self, key: &str) -> InFlightLoad {
        let mut in_flight = lock(&self.in_flight);
        if let Some(load) = in_flight.get(key) {
            return load.clone();
        }

        let loader = Arc::clone(&self.loader);
        let cancel = self.shutdown.child_token();
        let owned_key = key.to_string();
        let load = async move { loader.load(&owned_key, &cancel).await }
            .boxed()
            .shared();

        in_flight.insert(key.to_string(), load.clone());
        load
    }
}

#[async_trait]
impl CacheEngine for LocalGalaxy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> Result<Bytes, DomainError> {
        self.counters.record_get();

        if let Some(payload) = self.lookup(key) {
            self.counters.record_hit(CacheTier::Main);
            return Ok(payload);
        }

        self.counters.record_load();
        let load = self.load_shared(key);
        let result = load.clone().await;

        // The first waiter to finish retires the shared load and caches it.
        let leader = {
            let mut in_flight = lock(&self.in_flight);
            match in_flight.get(key) {
                Some(current) if current.ptr_eq(&load) => {
                    in_flight.remove(key);
                    true
                }
                _ => false,
            }
        };
        if leader {
            self.counters.record_backend_load(result.is_ok());
        }

        let entry = result.inspect_err(|e| {
            if leader {
                warn!(group = %self.name, key = %key, error = %e, "Load failed");
            }
        })?;

        if leader && !entry.is_expired() {
            lock(&self.main).insert(key.to_string(), entry.clone(), self.max_size);
            debug!(group = %self.name, key = %key, bytes = entry.len(), "Entry cached");
        }

        Ok(entry.payload)
    }
}

impl CacheStatsSource for LocalGalaxy {
    fn stats(&self) -> GalaxyStats {
        self.counters.snapshot()
    }
}

impl MembershipView for LocalGalaxy {
    fn set_peers(&self, peers: PeerSet) -> Result<(), DomainError> {
        self.membership.set_peers(peers)
    }

    fn peers(&self) -> PeerSet {
        self.membership.peers()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
