#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use ferrous_galaxy_application::ports::{
    CacheEngine, MembershipView, NameStream, ObjectReader, ObjectStore, PeerResolver,
};
use ferrous_galaxy_domain::{DomainError, ObjectAttributes, PeerSet};
use futures::TryStreamExt;
use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Mock ObjectStore
// ============================================================================

#[derive(Clone, Default)]
pub struct MockObjectStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    listing: Arc<Mutex<Vec<String>>>,
    should_fail: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
    last_range: Arc<Mutex<Option<(u64, u64)>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, name: &str, body: &[u8]) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert(name.to_string(), body.to_vec());
        self
    }

    /// Listing returned by `iter`, verbatim and in this order.
    pub fn with_listing(self, names: &[&str]) -> Self {
        *self.listing.lock().unwrap() = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_range(&self) -> Option<(u64, u64)> {
        *self.last_range.lock().unwrap()
    }

    async fn enter(&self, operation: &str, name: &str) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Backend {
                operation: operation.to_string(),
                name: name.to_string(),
                message: "mock backend unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn body(&self, operation: &str, name: &str) -> Result<Vec<u8>, DomainError> {
        self.objects
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::Backend {
                operation: operation.to_string(),
                name: name.to_string(),
                message: "object not found".to_string(),
            })
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn attributes(&self, name: &str) -> Result<ObjectAttributes, DomainError> {
        self.enter("attributes", name).await?;
        let body = self.body("attributes", name)?;
        Ok(ObjectAttributes::new(body.len() as u64, Utc::now()))
    }

    fn iter<'a>(&'a self, dir: &'a str) -> NameStream<'a> {
        let listing = self.listing.lock().unwrap().clone();
        Box::pin(
            futures::stream::once(async move {
                self.enter("iter", dir).await?;
                Ok::<_, DomainError>(futures::stream::iter(listing.into_iter().map(Ok)))
            })
            .try_flatten(),
        )
    }

    async fn get(&self, name: &str) -> Result<ObjectReader, DomainError> {
        self.enter("get", name).await?;
        let body = self.body("get", name)?;
        Ok(Box::new(Cursor::new(body)))
    }

    async fn get_range(
        &self,
        name: &str,
        offset: u64,
        length: u64,
    ) -> Result<ObjectReader, DomainError> {
        self.enter("get_range", name).await?;
        *self.last_range.lock().unwrap() = Some((offset, length));
        let body = self.body("get_range", name)?;
        let start = (offset as usize).min(body.len());
        let end = (start + length as usize).min(body.len());
        Ok(Box::new(Cursor::new(body[start..end].to_vec())))
    }

    async fn exists(&self, name: &str) -> Result<bool, DomainError> {
        self.enter("exists", name).await?;
        Ok(self.objects.lock().unwrap().contains_key(name))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// Mock MembershipView
// ============================================================================

#[derive(Default)]
pub struct MockMembershipView {
    peers: Mutex<PeerSet>,
    reject: AtomicBool,
    publishes: AtomicUsize,
}

impl MockMembershipView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reject(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    pub fn publish_count(&self) -> usize {
        self.publishes.load(Ordering::SeqCst)
    }
}

impl MembershipView for MockMembershipView {
    fn set_peers(&self, peers: PeerSet) -> Result<(), DomainError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(DomainError::InvalidPeerAddress("rejected by mock".to_string()));
        }
        self.publishes.fetch_add(1, Ordering::SeqCst);
        *self.peers.lock().unwrap() = peers;
        Ok(())
    }

    fn peers(&self) -> PeerSet {
        self.peers.lock().unwrap().clone()
    }
}

// ============================================================================
// Mock PeerResolver
// ============================================================================

/// Replays scripted results, one per `resolve` call. Once the script is
/// exhausted the last entry repeats.
pub struct ScriptedPeerResolver {
    script: Mutex<VecDeque<Result<Vec<String>, DomainError>>>,
    last: Mutex<Option<Result<Vec<String>, DomainError>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedPeerResolver {
    pub fn new(script: Vec<Result<Vec<String>, DomainError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn hanging(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(vec![Ok(vec!["http://10.0.0.1:80".to_string()])])
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PeerResolver for ScriptedPeerResolver {
    async fn resolve(&self, _addresses: &[String]) -> Result<PeerSet, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        let step = match next {
            Some(step) => {
                *self.last.lock().unwrap() = Some(step.clone());
                step
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Ok(Vec::new())),
        };

        step.map(PeerSet::new)
    }
}

// ============================================================================
// Mock CacheEngine
// ============================================================================

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
        "mock-group"
    }

    async fn get(&self, key: &str) -> Result<Bytes, DomainError> {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| Err(DomainError::InvalidCacheKey(key.to_string())))
    }
}
