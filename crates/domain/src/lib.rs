//! Ferrous Galaxy Domain Layer
pub mod cache_key;
pub mod caching_policy;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod object;
pub mod peer_set;
pub mod stats;

pub use cache_key::{ByteRange, CacheKeyDescriptor, Operation};
pub use caching_policy::{CachingPolicy, OperationTtl, ResolvedPolicy};
pub use config::{CliOverrides, Config, ConfigError};
pub use envelope::CacheEntryEnvelope;
pub use errors::DomainError;
pub use object::ObjectAttributes;
pub use peer_set::PeerSet;
pub use stats::{CacheTier, GalaxyStats};
