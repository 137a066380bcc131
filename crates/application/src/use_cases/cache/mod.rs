pub mod fetch_entries;
pub mod get_stats;
pub mod load_entry;

pub use fetch_entries::FetchCacheEntriesUseCase;
pub use get_stats::GetCacheStatsUseCase;
pub use load_entry::LoadCacheEntryUseCase;
