use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::{
    CachingConfig, ConfigError, GroupcacheConfig, LoggingConfig, ServerConfig, StorageConfig,
};
use crate::caching_policy::CachingPolicy;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub groupcache: GroupcacheConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub caching: CachingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub web_port: Option<u16>,
    pub self_url: Option<String>,
    pub storage_directory: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads the config file (or defaults when no path is given) and applies
    /// CLI overrides on top.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_string(),
                    source,
                })?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(self_url) = overrides.self_url {
            self.groupcache.self_url = self_url;
        }
        if let Some(directory) = overrides.storage_directory {
            self.storage.directory = directory;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.groupcache.self_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "groupcache.self_url must be set".to_string(),
            ));
        }

        if self.groupcache.group.trim().is_empty() {
            return Err(ConfigError::Validation(
                "groupcache.group must not be empty".to_string(),
            ));
        }

        if self.groupcache.max_size_bytes == 0 {
            return Err(ConfigError::Validation(
                "groupcache.max_size_bytes must be greater than zero".to_string(),
            ));
        }

        if self.groupcache.dns_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "groupcache.dns_interval_secs must be greater than zero".to_string(),
            ));
        }

        if let Some(ref nameserver) = self.groupcache.nameserver {
            nameserver.parse::<SocketAddr>().map_err(|e| {
                ConfigError::Validation(format!(
                    "groupcache.nameserver '{}' is not ip:port: {}",
                    nameserver, e
                ))
            })?;
        }

        if self.storage.directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage.directory must not be empty".to_string(),
            ));
        }

        // Compiles regexes and rejects zero TTLs.
        CachingPolicy::from_rules(&self.caching.rules)?;

        Ok(())
    }

    pub fn caching_policy(&self) -> Result<CachingPolicy, ConfigError> {
        CachingPolicy::from_rules(&self.caching.rules)
    }
}
