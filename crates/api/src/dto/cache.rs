use ferrous_galaxy_domain::GalaxyStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Clone)]
pub struct CacheStatsResponse {
    pub group: String,
    #[serde(flatten)]
    pub stats: GalaxyStats,
    pub hit_rate: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FetchEntriesRequest {
    pub keys: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct FetchedEntry {
    pub size: usize,
    /// Standard base64 of the raw payload.
    pub value: String,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct FetchEntriesResponse {
    pub entries: BTreeMap<String, FetchedEntry>,
    pub missing: Vec<String>,
}
