use async_trait::async_trait;
use ferrous_galaxy_application::ports::CacheLoader;
use ferrous_galaxy_domain::{CacheEntryEnvelope, DomainError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Loader returning `value-of:{key}` (or a fixed payload) and counting calls.
pub struct CountingLoader {
    calls: AtomicUsize,
    ttl: Duration,
    delay: Duration,
    payload_len: Option<usize>,
    should_fail: AtomicBool,
}

impl CountingLoader {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            ttl: Duration::from_secs(60),
            delay: Duration::ZERO,
            payload_len: None,
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every payload is `len` bytes of `x`.
    pub fn with_payload_len(mut self, len: usize) -> Self {
        self.payload_len = Some(len);
        self
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheLoader for CountingLoader {
    async fn load(
        &self,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<CacheEntryEnvelope, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::select! {
                _ = cancel.cancelled() => return Err(DomainError::LoadCancelled(key.to_string())),
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Backend {
                operation: "get".to_string(),
                name: key.to_string(),
                message: "backend unavailable".to_string(),
            });
        }

        let payload = match self.payload_len {
            Some(len) => vec![b'x'; len],
            None => format!("value-of:{}", key).into_bytes(),
        };
        CacheEntryEnvelope::expiring_in(payload, self.ttl)
    }
}
