//! In-process cache engine
//!
//! A single-node stand-in for a peer-aware distributed cache: one named
//! group with a byte-bounded LRU, read-through loading, and a membership
//! view kept current by the peer refresher.

pub mod local;
pub mod membership;
pub mod stats;

pub use local::LocalGalaxy;
pub use membership::PeerMembership;
pub use stats::GalaxyCounters;
