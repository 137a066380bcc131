use async_trait::async_trait;
use ferrous_galaxy_domain::DomainError;
use hickory_proto::rr::RecordType;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use super::message_builder::MessageBuilder;
use super::resolv_conf;
use super::response_parser::{DiscoveryAnswer, ResponseParser};
use super::udp::UdpTransport;

/// One SRV answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvTarget {
    pub target: String,
    pub port: u16,
}

/// Name lookups used by peer discovery.
///
/// An empty result is a valid answer (the name has no records right now);
/// only transport and server failures are errors.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, DomainError>;

    async fn lookup_srv(&self, name: &str) -> Result<Vec<SrvTarget>, DomainError>;
}

/// Queries one nameserver directly over UDP.
pub struct WireLookup {
    transport: UdpTransport,
    timeout: Duration,
}

impl WireLookup {
    pub fn new(nameserver: SocketAddr, timeout: Duration) -> Self {
        Self {
            transport: UdpTransport::new(nameserver),
            timeout,
        }
    }

    /// Uses the first nameserver of `/etc/resolv.conf`.
    pub fn from_system_config(timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self::new(resolv_conf::system_nameserver()?, timeout))
    }

    pub fn nameserver(&self) -> SocketAddr {
        self.transport.server_addr()
    }

    async fn query(&self, name: &str, record_type: RecordType) -> Result<DiscoveryAnswer, DomainError> {
        let (id, bytes) = MessageBuilder::build_query(name, record_type)?;
        let response = self.transport.exchange(&bytes, self.timeout).await?;
        let answer = ResponseParser::parse(&response, id)?;

        debug!(
            name = %name,
            record_type = ?record_type,
            server = %self.transport.server_addr(),
            "Discovery query answered"
        );

        Ok(answer)
    }
}

#[async_trait]
impl DnsLookup for WireLookup {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        let (v4, v6) = tokio::join!(
            self.query(host, RecordType::A),
            self.query(host, RecordType::AAAA)
        );

        // One family failing is tolerated as long as the other answered.
        let addresses = match (v4, v6) {
            (Ok(a), Ok(b)) => [a.addresses, b.addresses].concat(),
            (Ok(a), Err(_)) => a.addresses,
            (Err(_), Ok(b)) => b.addresses,
            (Err(e), Err(_)) => return Err(e),
        };
        Ok(unique(addresses))
    }

    async fn lookup_srv(&self, name: &str) -> Result<Vec<SrvTarget>, DomainError> {
        Ok(self.query(name, RecordType::SRV).await?.srv)
    }
}

/// A/AAAA through the operating system resolver; SRV through the first
/// nameserver of `/etc/resolv.conf`, since the system resolver API has no
/// SRV support. The file is re-read on every SRV lookup so nameserver
/// changes are picked up.
pub struct SystemLookup {
    timeout: Duration,
    resolv_conf: PathBuf,
}

impl SystemLookup {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            resolv_conf: PathBuf::from(resolv_conf::RESOLV_CONF_PATH),
        }
    }

    pub fn with_resolv_conf(mut self, path: impl Into<PathBuf>) -> Self {
        self.resolv_conf = path.into();
        self
    }
}

#[async_trait]
impl DnsLookup for SystemLookup {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        let resolved = tokio::time::timeout(self.timeout, tokio::net::lookup_host((host, 0)))
            .await
            .map_err(|_| DomainError::PeerResolution(format!("Timeout resolving '{}'", host)))?
            .map_err(|e| DomainError::PeerResolution(format!("Failed to resolve '{}': {}", host, e)))?;

        Ok(unique(resolved.map(|addr| addr.ip()).collect()))
    }

    async fn lookup_srv(&self, name: &str) -> Result<Vec<SrvTarget>, DomainError> {
        let nameserver = resolv_conf::nameserver_from(&self.resolv_conf).await?;
        WireLookup::new(nameserver, self.timeout).lookup_srv(name).await
    }
}

fn unique(mut addresses: Vec<IpAddr>) -> Vec<IpAddr> {
    addresses.sort_unstable();
    addresses.dedup();
    addresses
}
