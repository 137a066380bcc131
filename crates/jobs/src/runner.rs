use crate::PeerRefreshJob;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// let handles = JobRunner::new()
///     .with_peer_refresh(PeerRefreshJob::new(refresh).with_cancellation(token))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    peer_refresh: Option<PeerRefreshJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self { peer_refresh: None }
    }

    pub fn with_peer_refresh(mut self, job: PeerRefreshJob) -> Self {
        self.peer_refresh = Some(job);
        self
    }

    /// Start all registered background jobs. The returned handles finish
    /// once each job observes its cancellation token.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let mut handles = Vec::new();

        if let Some(job) = self.peer_refresh {
            handles.push(Arc::new(job).start().await);
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
