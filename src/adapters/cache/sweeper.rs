//! CacheSweeper - Background purge of expired cache entries.
//!
//! Runs on a fixed interval independent of request traffic so that keys
//! that are written once and never read again do not accumulate.
//!
//! ## Graceful Shutdown
//!
//! `SweeperHandle::shutdown` signals the loop through a watch channel and
//! waits for it to finish its final purge.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use super::TtlCache;

/// Spawns and owns the sweep loop.
pub struct CacheSweeper;

impl CacheSweeper {
    /// Starts purging `cache` every `interval` on the current runtime.
    pub fn spawn<V>(cache: Arc<TtlCache<V>>, interval: Duration) -> SweeperHandle
    where
        V: Send + Sync + 'static,
    {
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(run(cache, interval, rx));
        SweeperHandle { shutdown: tx, task }
    }
}

async fn run<V>(cache: Arc<TtlCache<V>>, interval: Duration, mut shutdown: watch::Receiver<bool>)
where
    V: Send + Sync + 'static,
{
    let mut ticker = time::interval(interval);
    // The first tick fires immediately; nothing can have expired yet.
    ticker.tick().await;

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    let removed = cache.purge_expired();
                    tracing::debug!(removed, "cache sweeper stopped");
                    return;
                }
            }

            _ = ticker.tick() => {
                let removed = cache.purge_expired();
                if removed > 0 {
                    tracing::debug!(removed, remaining = cache.entry_count(), "purged expired cache entries");
                }
            }
        }
    }
}

/// Handle to a running sweeper.
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stops the sweeper and waits for it to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "cache sweeper task ended abnormally");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::TtlCacheConfig;
    use crate::ports::KeyValueCache;

    #[tokio::test(start_paused = true)]
    async fn sweeper_purges_without_reads() {
        let cache = Arc::new(TtlCache::<u32>::new(TtlCacheConfig::default()));
        cache.set("k", 1, Some(Duration::from_secs(1)));

        let handle = CacheSweeper::spawn(Arc::clone(&cache), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(6)).await;

        assert_eq!(cache.len(), 0);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_keeps_live_entries() {
        let cache = Arc::new(TtlCache::<u32>::new(TtlCacheConfig::default()));
        cache.set("k", 1, Some(Duration::from_secs(60)));

        let handle = CacheSweeper::spawn(Arc::clone(&cache), Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(11)).await;

        assert_eq!(cache.get("k"), Some(1));
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_stops_the_loop() {
        let cache = Arc::new(TtlCache::<u32>::new(TtlCacheConfig::default()));
        let handle = CacheSweeper::spawn(cache, Duration::from_millis(10));
        assert!(handle.is_running());

        handle.shutdown().await;
    }
}
