use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Object metadata as returned by the storage backend.
///
/// Serialized with PascalCase keys (`Size`, `LastModified`), which is what
/// the caching bucket layer decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectAttributes {
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

impl ObjectAttributes {
    pub fn new(size: u64, last_modified: DateTime<Utc>) -> Self {
        Self {
            size,
            last_modified,
        }
    }
}
