use ferrous_galaxy_application::ports::{CacheEngine, MembershipView};
use ferrous_galaxy_application::use_cases::{FetchCacheEntriesUseCase, GetCacheStatsUseCase};
use prometheus::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn CacheEngine>,
    pub get_stats: Arc<GetCacheStatsUseCase>,
    pub fetch_entries: Arc<FetchCacheEntriesUseCase>,
    pub membership: Arc<dyn MembershipView>,
    pub registry: Arc<Registry>,
}
