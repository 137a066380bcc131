pub mod peer_refresh;
pub mod runner;

pub use peer_refresh::PeerRefreshJob;
pub use runner::JobRunner;
