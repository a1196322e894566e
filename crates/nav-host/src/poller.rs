//! Background refresh of the moderation queue
//!
//! Refetches the forest on a fixed interval so the pending queue picks up
//! items submitted elsewhere. Refreshes go through the host's stamp gate, so
//! a slow poll never overwrites a newer edit. At most one refresh is in
//! flight; ticks that fire while it runs are skipped.

use crate::host::NavigationHost;
use crate::store::ForestStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Handle to a running poll loop; cancels it on drop
#[derive(Debug)]
pub struct PendingQueuePoller {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PendingQueuePoller {
    /// Start polling `host` every `interval`
    ///
    /// The first refresh fires immediately. Must be called inside a Tokio
    /// runtime.
    #[must_use]
    pub fn spawn<S>(host: Arc<NavigationHost<S>>, interval: Duration) -> Self
    where
        S: ForestStore + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut inflight = JoinSet::new();

            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if !inflight.is_empty() {
                            tracing::debug!("previous refresh still running, skipping tick");
                            continue;
                        }
                        let host = Arc::clone(&host);
                        inflight.spawn(async move { host.refresh().await.map(|_| ()) });
                    }
                    Some(joined) = inflight.join_next() => match joined {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => tracing::warn!(error = %e, "pending queue refresh failed"),
                        Err(e) => tracing::error!(error = %e, "pending queue refresh panicked"),
                    },
                }
            }

            inflight.shutdown().await;
            tracing::debug!("pending queue poller stopped");
        });

        tracing::debug!(interval_ms = interval.as_millis(), "pending queue poller started");
        Self {
            cancel,
            task: Some(task),
        }
    }

    /// Signal the loop to stop without waiting
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Stop the loop and wait until in-flight refreshes are aborted
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "pending queue poller task failed");
            }
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for PendingQueuePoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
