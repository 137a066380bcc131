use serde::{Deserialize, Serialize};

/// Object storage backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory of the filesystem bucket
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> String {
    "./data".to_string()
}
