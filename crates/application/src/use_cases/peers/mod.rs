pub mod refresh_peers;

pub use refresh_peers::RefreshPeersUseCase;
