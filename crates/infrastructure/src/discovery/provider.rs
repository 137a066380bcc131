use async_trait::async_trait;
use ferrous_galaxy_application::ports::PeerResolver;
use ferrous_galaxy_domain::{DomainError, PeerSet};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, error};

use super::address::{PeerAddress, QueryType};
use super::lookup::DnsLookup;
use crate::metrics::DiscoveryMetrics;

/// Expands configured peer addresses into concrete peer URLs.
///
/// A failure on any address fails the whole resolution so the caller can
/// keep the previous membership instead of publishing a partial one.
pub struct DnsPeerResolver<L: DnsLookup> {
    lookup: L,
    metrics: Option<Arc<DiscoveryMetrics>>,
}

impl<L: DnsLookup> DnsPeerResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<DiscoveryMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    async fn expand(&self, address: &PeerAddress) -> Result<Vec<String>, DomainError> {
        match address.qtype {
            QueryType::Static => Ok(vec![address.raw.clone()]),
            QueryType::A => {
                // Port presence is enforced by PeerAddress::parse.
                let port = address.port.ok_or_else(|| {
                    DomainError::InvalidPeerAddress(address.raw.clone())
                })?;
                let ips = self.lookup.lookup_ip(&address.host).await?;
                Ok(ips.into_iter().map(|ip| address.render_ip(ip, port)).collect())
            }
            QueryType::Srv => {
                let targets = self.lookup.lookup_srv(&address.host).await?;
                let mut out = Vec::new();
                for target in targets {
                    let port = address.port.unwrap_or(target.port);
                    let ips = self.lookup.lookup_ip(&target.target).await?;
                    out.extend(ips.into_iter().map(|ip| address.render_ip(ip, port)));
                }
                Ok(out)
            }
            QueryType::SrvNoA => {
                let targets = self.lookup.lookup_srv(&address.host).await?;
                Ok(targets
                    .into_iter()
                    .map(|t| address.render(&t.target, address.port.unwrap_or(t.port)))
                    .collect())
            }
        }
    }
}

#[async_trait]
impl<L: DnsLookup> PeerResolver for DnsPeerResolver<L> {
    async fn resolve(&self, addresses: &[String]) -> Result<PeerSet, DomainError> {
        let mut resolved = BTreeSet::new();

        for raw in addresses {
            let address = PeerAddress::parse(raw)?;

            if address.qtype != QueryType::Static {
                if let Some(metrics) = &self.metrics {
                    metrics.record_lookup();
                }
            }

            match self.expand(&address).await {
                Ok(peers) => {
                    debug!(address = %raw, count = peers.len(), "Peer address expanded");
                    if let Some(metrics) = &self.metrics {
                        metrics.record_results(raw, peers.len());
                    }
                    resolved.extend(peers);
                }
                Err(e) => {
                    error!(address = %raw, error = %e, "Failed to resolve peer address");
                    if let Some(metrics) = &self.metrics {
                        metrics.record_failure();
                    }
                    return Err(e);
                }
            }
        }

        Ok(PeerSet::new(resolved))
    }
}
