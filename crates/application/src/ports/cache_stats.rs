use ferrous_galaxy_domain::GalaxyStats;

/// Live statistics of the cache engine. Reads must not block.
pub trait CacheStatsSource: Send + Sync {
    fn stats(&self) -> GalaxyStats;
}
