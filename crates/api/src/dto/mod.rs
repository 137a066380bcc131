pub mod cache;
pub mod peers;

pub use cache::{CacheStatsResponse, FetchEntriesRequest, FetchEntriesResponse, FetchedEntry};
pub use peers::PeersResponse;
