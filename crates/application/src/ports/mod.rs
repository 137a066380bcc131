pub mod cache_engine;
pub mod cache_loader;
pub mod cache_stats;
pub mod membership_view;
pub mod object_store;
pub mod peer_resolver;

pub use cache_engine::CacheEngine;
pub use cache_loader::CacheLoader;
pub use cache_stats::CacheStatsSource;
pub use membership_view::MembershipView;
pub use object_store::{NameStream, ObjectReader, ObjectStore};
pub use peer_resolver::PeerResolver;
