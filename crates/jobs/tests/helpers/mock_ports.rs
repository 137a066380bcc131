use async_trait::async_trait;
use ferrous_galaxy_application::ports::{MembershipView, PeerResolver};
use ferrous_galaxy_domain::{DomainError, PeerSet};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockMembershipView {
    peers: Mutex<PeerSet>,
    publishes: AtomicUsize,
}

impl MockMembershipView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish_count(&self) -> usize {
        self.publishes.load(Ordering::SeqCst)
    }
}

impl MembershipView for MockMembershipView {
    fn set_peers(&self, peers: PeerSet) -> Result<(), DomainError> {
        self.publishes.fetch_add(1, Ordering::SeqCst);
        *self.peers.lock().unwrap() = peers;
        Ok(())
    }

    fn peers(&self) -> PeerSet {
        self.peers.lock().unwrap().clone()
    }
}

/// Replays one scripted result per tick; the last entry repeats.
pub struct ScriptedPeerResolver {
    script: Mutex<VecDeque<Result<Vec<&'static str>, DomainError>>>,
    last: Mutex<Option<Result<Vec<&'static str>, DomainError>>>,
    calls: AtomicUsize,
}

impl ScriptedPeerResolver {
    pub fn new(script: Vec<Result<Vec<&'static str>, DomainError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
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
