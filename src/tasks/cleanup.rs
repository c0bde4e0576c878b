//! Cache Sweep Task
//!
//! Background task that periodically sweeps expired entries out of the
//! page and search tiers and trims over-age records from the log buffer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LogCache;

// == Sweeper Handle ==
/// Stop handle for a running sweeper.
///
/// The sweep loop has no natural termination, so whoever discards the
/// cache must stop the sweeper through this handle or the task lives for
/// the rest of the process.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Asks the sweeper to stop and waits for it to finish.
    ///
    /// A sweep already in progress completes first.
    pub async fn stop(self) {
        self.shutdown.notify_one();
        let _ = self.handle.await;
    }

    /// Kills the task immediately without waiting.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a background task that sweeps the cache at a fixed interval.
///
/// The task takes the write lock for the duration of each sweep, so
/// sweeping and foreground mutation are mutually exclusive.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval` - Time between sweep passes
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(LogCache::new(&CacheConfig::default())));
/// let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// sweeper.stop().await;
/// ```
pub fn spawn_sweeper(cache: Arc<RwLock<LogCache>>, interval: Duration) -> SweeperHandle {
    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);

    let handle = tokio::spawn(async move {
        info!("starting cache sweeper with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let summary = {
                        let mut cache_guard = cache.write().await;
                        cache_guard.sweep()
                    };

                    if summary.total_removed() > 0 {
                        info!(
                            "sweep removed {} expired page entries, {} expired search entries, {} over-age log records",
                            summary.expired_pages, summary.expired_searches, summary.trimmed_logs
                        );
                    } else {
                        debug!("sweep found nothing to remove");
                    }
                }
                _ = notify.notified() => {
                    info!("cache sweeper stopping");
                    break;
                }
            }
        }
    });

    SweeperHandle { shutdown, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::CacheConfig;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Map};

    fn shared_cache() -> (Arc<RwLock<LogCache>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));
        let cache = LogCache::with_clock(&CacheConfig::default(), clock.clone());
        (Arc::new(RwLock::new(cache)), clock)
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let (cache, clock) = shared_cache();
        let filters = Map::new();

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set_page(1, &filters, json!("payload"));
        }

        // Cross the TTL boundary, then let the sweeper fire
        clock.advance(chrono::Duration::minutes(3));
        let sweeper = spawn_sweeper(cache.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(200)).await;

        {
            let cache_guard = cache.read().await;
            let info = cache_guard.debug_info();
            assert!(info.page_keys.is_empty(), "expired entry should have been swept");
            assert!(info.stats.last_cleanup.is_some());
        }

        sweeper.stop().await;
    }

    #[tokio::test]
    async fn test_sweeper_preserves_fresh_entries() {
        let (cache, _clock) = shared_cache();
        let filters = Map::new();

        {
            let mut cache_guard = cache.write().await;
            cache_guard.set_page(1, &filters, json!("payload"));
        }

        let sweeper = spawn_sweeper(cache.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(200)).await;

        {
            let mut cache_guard = cache.write().await;
            assert!(
                cache_guard.get_page(1, &filters).is_some(),
                "fresh entry should survive sweeping"
            );
        }

        sweeper.stop().await;
    }

    #[tokio::test]
    async fn test_sweeper_stop_terminates_task() {
        let (cache, _clock) = shared_cache();

        let sweeper = spawn_sweeper(cache, Duration::from_secs(300));

        // stop() must return promptly even mid-sleep
        tokio::time::timeout(Duration::from_secs(1), sweeper.stop())
            .await
            .expect("sweeper should stop without waiting out its interval");
    }

    #[tokio::test]
    async fn test_sweeper_can_be_aborted() {
        let (cache, _clock) = shared_cache();

        let sweeper = spawn_sweeper(cache, Duration::from_secs(300));
        sweeper.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(sweeper.is_finished(), "task should be finished after abort");
    }
}
