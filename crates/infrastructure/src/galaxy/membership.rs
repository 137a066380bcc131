use arc_swap::ArcSwap;
use ferrous_galaxy_application::ports::MembershipView;
use ferrous_galaxy_domain::{DomainError, PeerSet};
use http::Uri;
use std::sync::Arc;
use tracing::debug;

/// Current peer set, replaced wholesale on every publish.
pub struct PeerMembership {
    self_url: String,
    peers: ArcSwap<PeerSet>,
}

impl PeerMembership {
    pub fn new(self_url: impl Into<String>) -> Result<Self, DomainError> {
        let self_url = self_url.into();
        validate_peer_url(&self_url)?;
        Ok(Self {
            self_url,
            peers: ArcSwap::from_pointee(PeerSet::empty()),
        })
    }

    pub fn self_url(&self) -> &str {
        &self.self_url
    }

    pub fn load(&self) -> Arc<PeerSet> {
        self.peers.load_full()
    }
}

impl MembershipView for PeerMembership {
    fn set_peers(&self, peers: PeerSet) -> Result<(), DomainError> {
        for peer in peers.iter() {
            validate_peer_url(peer)?;
        }

        debug!(
            count = peers.len(),
            includes_self = peers.contains(&self.self_url),
            "Peer set replaced"
        );
        self.peers.store(Arc::new(peers));
        Ok(())
    }

    fn peers(&self) -> PeerSet {
        PeerSet::clone(&self.peers.load())
    }
}

/// Peers are addressed as `http(s)://host[:port][/path]`.
pub fn validate_peer_url(url: &str) -> Result<(), DomainError> {
    let uri: Uri = url
        .parse()
        .map_err(|e| DomainError::InvalidPeerAddress(format!("'{}': {}", url, e)))?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => {
            return Err(DomainError::InvalidPeerAddress(format!(
                "'{}': scheme must be http or https",
                url
            )))
        }
    }

    if uri.authority().is_none() {
        return Err(DomainError::InvalidPeerAddress(format!(
            "'{}': missing host",
            url
        )));
    }

    Ok(())
}
