use ferrous_galaxy_domain::{DomainError, PeerSet};

/// The cache engine's view of which peers exist.
///
/// `set_peers` replaces the whole set at once; readers see either the
/// previous set or the new one, never a mix. On error the previous set stays
/// in place.
pub trait MembershipView: Send + Sync {
    fn set_peers(&self, peers: PeerSet) -> Result<(), DomainError>;

    fn peers(&self) -> PeerSet;
}
