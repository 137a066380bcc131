use serde::Serialize;

/// Point-in-time copy of the cache engine's cumulative counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GalaxyStats {
    /// Get requests, including the ones coming from peers.
    pub gets: u64,
    /// Gets that missed both cache tiers (gets - cache hits).
    pub loads: u64,
    /// Remote loads or remote cache hits.
    pub peer_loads: u64,
    pub peer_load_errors: u64,
    /// Direct loads through the registered loader.
    pub backend_loads: u64,
    pub backend_load_errors: u64,
    pub main_cache_hits: u64,
    pub hot_cache_hits: u64,
}

/// Cache tier a hit was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTier {
    Main,
    Hot,
}

impl CacheTier {
    /// Label value on the hits series. Dashboards key on these exact names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "MainCache",
            Self::Hot => "HotCache",
        }
    }
}
