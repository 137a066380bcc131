use async_trait::async_trait;
use ferrous_galaxy_domain::DomainError;
use ferrous_galaxy_infrastructure::discovery::{DnsLookup, SrvTarget};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory DNS answering from fixed tables.
#[derive(Default)]
pub struct MockLookup {
    hosts: HashMap<String, Vec<IpAddr>>,
    services: HashMap<String, Vec<SrvTarget>>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: &str, ips: &[&str]) -> Self {
        self.hosts.insert(
            host.to_string(),
            ips.iter().map(|ip| ip.parse().unwrap()).collect(),
        );
        self
    }

    pub fn with_service(mut self, name: &str, targets: &[(&str, u16)]) -> Self {
        self.services.insert(
            name.to_string(),
            targets
                .iter()
                .map(|(target, port)| SrvTarget {
                    target: target.to_string(),
                    port: *port,
                })
                .collect(),
        );
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, name: &str) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(name) {
            return Err(DomainError::PeerResolution(format!("lookup of {} failed", name)));
        }
        Ok(())
    }
}

#[async_trait]
impl DnsLookup for MockLookup {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        self.check(host)?;
        Ok(self.hosts.get(host).cloned().unwrap_or_default())
    }

    async fn lookup_srv(&self, name: &str) -> Result<Vec<SrvTarget>, DomainError> {
        self.check(name)?;
        Ok(self.services.get(name).cloned().unwrap_or_default())
    }
}
