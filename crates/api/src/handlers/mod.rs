pub mod cache;
pub mod health;
pub mod metrics;
pub mod peers;

pub use cache::{fetch_entries, get_cache_stats, get_entry};
pub use health::health_check;
pub use metrics::get_metrics;
pub use peers::get_peers;
