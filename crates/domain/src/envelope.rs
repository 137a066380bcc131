use bytes::Bytes;
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

use crate::errors::DomainError;

/// Value handed back to the cache engine after a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntryEnvelope {
    pub payload: Bytes,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntryEnvelope {
    /// Stamps `payload` with an absolute deadline `ttl` from now.
    pub fn expiring_in(payload: impl Into<Bytes>, ttl: Duration) -> Result<Self, DomainError> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|e| DomainError::InvalidConfig(format!("TTL out of range: {}", e)))?;

        Ok(Self {
            payload: payload.into(),
            expires_at: Utc::now() + ttl,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
