use ferrous_galaxy_domain::GalaxyStats;
use std::sync::Arc;

use crate::ports::CacheStatsSource;

pub struct GetCacheStatsUseCase {
    source: Arc<dyn CacheStatsSource>,
}

impl GetCacheStatsUseCase {
    pub fn new(source: Arc<dyn CacheStatsSource>) -> Self {
        Self { source }
    }

    pub fn execute(&self) -> GalaxyStats {
        self.source.stats()
    }
}
