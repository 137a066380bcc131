use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid cache key format: {0}")]
    InvalidCacheKey(String),

    #[error("Unknown cache key operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid byte range in cache key: {0}")]
    InvalidRange(String),

    /// A key reached the loader for a path that was never configured for
    /// caching under this operation. The caching layer and the loader
    /// disagree about the routing table.
    #[error("Caching layer must not call on unconfigured paths: {operation} {name}")]
    UnconfiguredPath { operation: String, name: String },

    #[error("Backend {operation} failed for '{name}': {message}")]
    Backend {
        operation: String,
        name: String,
        message: String,
    },

    #[error("Load cancelled for key: {0}")]
    LoadCancelled(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Peer resolution failed: {0}")]
    PeerResolution(String),

    #[error("Failed to publish peers: {0}")]
    PeerPublish(String),

    #[error("Invalid peer address: {0}")]
    InvalidPeerAddress(String),

    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    /// Malformed or unrecognized cache key. Never worth retrying.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCacheKey(_) | Self::UnknownOperation(_) | Self::InvalidRange(_)
        )
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::UnconfiguredPath { .. })
    }

    pub fn is_backend_error(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }
}
