use sinkhole_application::ports::DnsCachePort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_PURGE_INTERVAL_SECS: u64 = 600;

/// Periodically drops expired learned entries from the cache.
pub struct CachePurgeJob {
    cache: Arc<dyn DnsCachePort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl CachePurgeJob {
    pub fn new(cache: Arc<dyn DnsCachePort>) -> Self {
        Self {
            cache,
            interval: Duration::from_secs(DEFAULT_PURGE_INTERVAL_SECS),
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

    /// Runs one sweep and returns the number of removed entries.
    pub fn run_once(&self) -> usize {
        let removed = self.cache.purge_expired();
        if removed > 0 {
            info!(removed, cache_size = self.cache.len(), "Cache purge completed");
        } else {
            debug!(cache_size = self.cache.len(), "Cache purge found nothing to remove");
        }
        removed
    }

    /// Sweeps on every interval tick until cancelled.
    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval.as_secs(), "Starting cache purge job");

        let mut interval = tokio::time::interval(self.interval);
        // First tick completes immediately
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("CachePurgeJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.run_once();
                }
            }
        }
    }
}
