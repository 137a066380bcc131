use ferrous_galaxy_domain::{DomainError, PeerSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::ports::{MembershipView, PeerResolver};

/// One resolve-then-publish round of peer membership.
///
/// The membership view is only touched after a complete, non-empty
/// resolution. Any failure leaves the previously published peers in place.
pub struct RefreshPeersUseCase {
    resolver: Arc<dyn PeerResolver>,
    view: Arc<dyn MembershipView>,
    addresses: Vec<String>,
    resolve_timeout: Duration,
}

impl RefreshPeersUseCase {
    pub fn new(
        resolver: Arc<dyn PeerResolver>,
        view: Arc<dyn MembershipView>,
        addresses: Vec<String>,
    ) -> Self {
        Self {
            resolver,
            view,
            addresses,
            resolve_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// # Errors
    ///
    /// * `PeerResolution` - lookup failed, timed out or produced no peers
    /// * `PeerPublish` - the membership view rejected the resolved set
    #[instrument(skip(self), fields(addresses = self.addresses.len()))]
    pub async fn execute(&self) -> Result<PeerSet, DomainError> {
        let resolved =
            match tokio::time::timeout(self.resolve_timeout, self.resolver.resolve(&self.addresses))
                .await
            {
                Ok(Ok(peers)) => peers,
                Ok(Err(e)) => return Err(as_resolution_error(e)),
                Err(_) => {
                    return Err(DomainError::PeerResolution(format!(
                        "timed out after {}ms",
                        self.resolve_timeout.as_millis()
                    )))
                }
            };

        if resolved.is_empty() {
            return Err(DomainError::PeerResolution(
                "resolution returned no peers".to_string(),
            ));
        }

        if resolved == self.view.peers() {
            debug!(peers = resolved.len(), "Peer membership unchanged");
            return Ok(resolved);
        }

        self.view
            .set_peers(resolved.clone())
            .map_err(as_publish_error)?;

        info!(peers = ?resolved.as_slice(), "Peer membership updated");
        Ok(resolved)
    }
}

fn as_resolution_error(error: DomainError) -> DomainError {
    match error {
        DomainError::PeerResolution(_) => error,
        other => DomainError::PeerResolution(other.to_string()),
    }
}

fn as_publish_error(error: DomainError) -> DomainError {
    match error {
        DomainError::PeerPublish(_) => error,
        other => DomainError::PeerPublish(other.to_string()),
    }
}
