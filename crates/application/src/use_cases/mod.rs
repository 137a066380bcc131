pub mod cache;
pub mod peers;

pub use cache::{FetchCacheEntriesUseCase, GetCacheStatsUseCase, LoadCacheEntryUseCase};
pub use peers::RefreshPeersUseCase;
