use ferrous_galaxy_application::use_cases::RefreshPeersUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Keeps cache peer membership in sync with service discovery.
///
/// The first refresh runs as soon as the job starts. A failed round keeps
/// the previous membership and the job retries on the next tick.
pub struct PeerRefreshJob {
    refresh: Arc<RefreshPeersUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl PeerRefreshJob {
    pub fn new(refresh: Arc<RefreshPeersUseCase>) -> Self {
        Self {
            refresh,
            interval: Duration::from_secs(60),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            addresses = self.refresh.addresses().len(),
            "Starting peer refresh job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("PeerRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        // Cancellation also interrupts a round in progress.
                        tokio::select! {
                            _ = self.shutdown.cancelled() => {
                                info!("PeerRefreshJob: shutting down");
                                break;
                            }
                            result = self.refresh.execute() => match result {
                                Ok(peers) => debug!(peers = peers.len(), "PeerRefreshJob: round completed"),
                                Err(e) => error!(error = %e, "PeerRefreshJob: refresh failed, keeping previous peers"),
                            }
                        }
                    }
                }
            }
        })
    }
}
