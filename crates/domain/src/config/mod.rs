//! Configuration module for Ferrous Galaxy
//!
//! This module contains all configuration structures organized by domain:
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP binding
//! - `groupcache`: Peers, discovery and cache sizing
//! - `storage`: Object storage backend
//! - `caching`: Per-operation TTL routing rules
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod caching;
pub mod errors;
pub mod groupcache;
pub mod logging;
pub mod root;
pub mod server;
pub mod storage;

pub use caching::{
    CachingConfig, CachingRule, ExistsTtlConfig, NameMatcherConfig, TtlConfig,
    UnconfiguredPathAction,
};
pub use errors::ConfigError;
pub use groupcache::{DnsSdResolverKind, GroupcacheConfig};
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use storage::StorageConfig;
