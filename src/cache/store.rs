//! Log Cache Store Module
//!
//! Facade combining the page tier, search tier, recent-log buffer, and
//! shared statistics behind the operations the log viewer calls.

use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cache::buffer::RecentLogBuffer;
use crate::cache::key;
use crate::cache::stats::CacheStats;
use crate::cache::tier::TierStore;
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;

// == Sweep Summary ==
/// What one sweep pass removed.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SweepSummary {
    /// Page entries removed for exceeding the TTL
    pub expired_pages: usize,
    /// Search entries removed for exceeding the TTL
    pub expired_searches: usize,
    /// Buffered records dropped by the retention rule
    pub trimmed_logs: usize,
}

impl SweepSummary {
    /// Total number of items removed by the sweep.
    pub fn total_removed(&self) -> usize {
        self.expired_pages + self.expired_searches + self.trimmed_logs
    }
}

// == Debug Info ==
/// Snapshot of cache internals for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct DebugInfo {
    /// Canonical keys currently in the page tier
    pub page_keys: Vec<String>,
    /// Canonical keys currently in the search tier
    pub search_keys: Vec<String>,
    /// Number of records in the recent-log buffer
    pub buffered_logs: usize,
    /// Counters and memory estimate at snapshot time
    pub stats: CacheStats,
}

// == Log Cache ==
/// In-memory cache for a log viewer.
///
/// Holds paginated listing results and search results in two bounded TTL
/// tiers, plus a newest-first buffer of recently arrived log records.
/// Construct one per owner and share it explicitly; for concurrent use
/// wrap it in `Arc<RwLock<LogCache>>` so foreground calls and the
/// background sweep are mutually exclusive.
#[derive(Debug)]
pub struct LogCache {
    /// Paginated listing results, keyed by (page, filters)
    pages: TierStore,
    /// Search results, keyed by (query, options)
    searches: TierStore,
    /// Most recently arrived log records, newest first
    recent: RecentLogBuffer,
    /// Hit/miss/eviction counters shared across both tiers
    stats: CacheStats,
    /// Retention window for buffered records
    log_retention: Duration,
    /// Time source for every age comparison
    clock: Arc<dyn Clock>,
}

impl LogCache {
    // == Constructors ==
    /// Creates a cache on the system clock.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from the given clock.
    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let ttl = Duration::seconds(config.entry_ttl_secs as i64);
        Self {
            pages: TierStore::new(config.max_pages, ttl),
            searches: TierStore::new(config.max_searches, ttl),
            recent: RecentLogBuffer::new(config.max_buffered_logs),
            stats: CacheStats::new(),
            log_retention: Duration::seconds(config.log_retention_secs as i64),
            clock,
        }
    }

    // == Get Page ==
    /// Looks up a cached page listing.
    ///
    /// Absent and expired both count as a miss; an expired entry stays in
    /// place until swept or evicted.
    pub fn get_page(&mut self, page: u32, filters: &Map<String, Value>) -> Option<Value> {
        let cache_key = key::page_key(page, filters);
        let now = self.clock.now();

        let found = self.pages.get(&cache_key, now).cloned();
        match found {
            Some(data) => {
                self.stats.record_hit();
                Some(data)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set Page ==
    /// Stores an already-fetched page listing.
    pub fn set_page(&mut self, page: u32, filters: &Map<String, Value>, data: Value) {
        let cache_key = key::page_key(page, filters);
        let now = self.clock.now();

        if self.pages.insert(cache_key, data, now) {
            self.stats.record_eviction();
        }
        self.refresh_memory();
    }

    // == Get Search ==
    /// Looks up a cached search result.
    pub fn get_search(&mut self, query: &str, options: &Map<String, Value>) -> Option<Value> {
        let cache_key = key::search_key(query, options);
        let now = self.clock.now();

        let found = self.searches.get(&cache_key, now).cloned();
        match found {
            Some(data) => {
                self.stats.record_hit();
                Some(data)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set Search ==
    /// Stores an already-fetched search result.
    pub fn set_search(&mut self, query: &str, options: &Map<String, Value>, data: Value) {
        let cache_key = key::search_key(query, options);
        let now = self.clock.now();

        if self.searches.insert(cache_key, data, now) {
            self.stats.record_eviction();
        }
        self.refresh_memory();
    }

    // == Add Incremental Logs ==
    /// Buffers a batch of newly arrived log records (newest first) and
    /// invalidates every cached page.
    ///
    /// New records can reorder or renumber paginated listings, so the
    /// whole page tier goes; search results are point-in-time snapshots
    /// and are deliberately left alone. An empty batch is a no-op.
    pub fn add_incremental_logs(&mut self, batch: Vec<Value>) {
        if batch.is_empty() {
            return;
        }

        self.recent.add_batch(batch);
        self.pages.clear();
        self.refresh_memory();
    }

    // == Recent Logs ==
    /// Read-only view of the newest `limit` buffered records.
    pub fn recent_logs(&self, limit: usize) -> Vec<Value> {
        self.recent.recent(limit)
    }

    // == Invalidate Pages ==
    /// Clears the page tier.
    pub fn invalidate_pages(&mut self) {
        self.pages.clear();
        self.refresh_memory();
    }

    // == Invalidate Search ==
    /// Clears the search tier.
    pub fn invalidate_search(&mut self) {
        self.searches.clear();
        self.refresh_memory();
    }

    // == Clear ==
    /// Empties every tier and the buffer and zeroes the counters.
    ///
    /// Does not touch the background sweeper; a cleared cache keeps
    /// being swept.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.searches.clear();
        self.recent.clear();
        self.stats.reset_counters();
        self.refresh_memory();
    }

    // == Sweep ==
    /// One maintenance pass: removes expired page and search entries,
    /// trims over-age buffered records, refreshes the memory estimate,
    /// and stamps the sweep time.
    ///
    /// Called by the background sweeper; also callable directly when the
    /// owner drives ticks itself.
    pub fn sweep(&mut self) -> SweepSummary {
        let now = self.clock.now();

        let summary = SweepSummary {
            expired_pages: self.pages.sweep(now),
            expired_searches: self.searches.sweep(now),
            trimmed_logs: self.recent.trim_older_than(now - self.log_retention),
        };

        self.stats.last_cleanup = Some(now);
        self.refresh_memory();
        summary
    }

    // == Stats ==
    /// Snapshot of the current counters and memory estimate.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    // == Debug Info ==
    /// Snapshot of keys, buffer size, and stats for diagnostics.
    pub fn debug_info(&self) -> DebugInfo {
        DebugInfo {
            page_keys: self.pages.keys(),
            search_keys: self.searches.keys(),
            buffered_logs: self.recent.len(),
            stats: self.stats.clone(),
        }
    }

    // == Refresh Memory ==
    /// Recomputes the heuristic memory estimate after a mutation.
    fn refresh_memory(&mut self) {
        self.stats
            .update_memory(self.pages.len(), self.searches.len(), self.recent.len());
    }
}
