use serde::{Deserialize, Serialize};

/// Which resolver expands `dns+` / `dnssrv+` peer addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsSdResolverKind {
    /// Operating system resolver for A/AAAA; SRV goes to the first
    /// nameserver in `/etc/resolv.conf`.
    #[default]
    System,
    /// Every lookup is a UDP query to `nameserver`.
    Wire,
}

/// Distributed in-memory cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupcacheConfig {
    /// Peer addresses (repeatable). Prefix with `dns+`, `dnssrv+` or
    /// `dnssrvnoa+` to discover peers through DNS, e.g.
    /// `dns+http://galaxy-store:10902/`.
    #[serde(default)]
    pub peers: Vec<String>,

    /// Address of this instance in the peer list, e.g. `http://10.0.0.4:10902`.
    #[serde(default = "default_self_url")]
    pub self_url: String,

    /// Maximum size of the in-memory cache in bytes (default: 250 MiB)
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,

    /// Group name. All instances must use the same group and bucket.
    #[serde(default = "default_group")]
    pub group: String,

    #[serde(default)]
    pub dns_sd_resolver: DnsSdResolverKind,

    /// Nameserver (`ip:port`) for the `wire` resolver.
    #[serde(default)]
    pub nameserver: Option<String>,

    /// How often peer addresses are resolved, in seconds (default: 60)
    #[serde(default = "default_dns_interval_secs")]
    pub dns_interval_secs: u64,

    /// Upper bound for one resolution round, in milliseconds (default: 5000)
    #[serde(default = "default_dns_timeout_ms")]
    pub dns_timeout_ms: u64,
}

impl GroupcacheConfig {
    /// Configured peers, or just ourselves when none were given.
    pub fn effective_peers(&self) -> Vec<String> {
        if self.peers.is_empty() {
            vec![self.self_url.clone()]
        } else {
            self.peers.clone()
        }
    }
}

impl Default for GroupcacheConfig {
    fn default() -> Self {
        Self {
            peers: Vec::new(),
            self_url: default_self_url(),
            max_size_bytes: default_max_size_bytes(),
            group: default_group(),
            dns_sd_resolver: DnsSdResolverKind::default(),
            nameserver: None,
            dns_interval_secs: default_dns_interval_secs(),
            dns_timeout_ms: default_dns_timeout_ms(),
        }
    }
}

fn default_self_url() -> String {
    "http://127.0.0.1:10902".to_string()
}

fn default_max_size_bytes() -> u64 {
    250 * 1024 * 1024
}

fn default_group() -> String {
    "galaxy".to_string()
}

fn default_dns_interval_secs() -> u64 {
    60
}

fn default_dns_timeout_ms() -> u64 {
    5000
}
