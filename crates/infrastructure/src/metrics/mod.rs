//! Prometheus exposition for the cache engine and peer discovery

pub mod discovery_metrics;
pub mod stats_collector;

pub use discovery_metrics::DiscoveryMetrics;
pub use stats_collector::CacheStatsCollector;
