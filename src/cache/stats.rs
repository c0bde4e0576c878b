//! Cache Statistics Module
//!
//! Tracks hit/miss accounting and the heuristic memory estimate across
//! all cache tiers.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Memory Cost Constants ==
/// Approximate cost of one cached page listing
pub const PAGE_ENTRY_COST_KB: f64 = 50.0;

/// Approximate cost of one cached search result
pub const SEARCH_ENTRY_COST_KB: f64 = 25.0;

/// Approximate cost of one buffered log record
pub const LOG_RECORD_COST_KB: f64 = 0.5;

// == Memory Estimate ==
/// Heuristic estimate of bytes held, in KB. Not exact: payloads are
/// opaque, so each tier is costed at a flat per-entry rate.
pub fn estimate_kb(pages: usize, searches: usize, buffered_logs: usize) -> f64 {
    pages as f64 * PAGE_ENTRY_COST_KB
        + searches as f64 * SEARCH_ENTRY_COST_KB
        + buffered_logs as f64 * LOG_RECORD_COST_KB
}

// == Cache Stats ==
/// Cumulative cache performance counters.
///
/// Counters accumulate for the life of the cache object and reset only
/// on a full clear.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups satisfied by a present, non-expired entry
    pub hits: u64,
    /// Number of lookups that found nothing usable (absent or expired)
    pub misses: u64,
    /// Number of entries evicted by capacity pressure
    pub evictions: u64,
    /// Heuristic memory estimate across all tiers, in KB
    pub memory_usage_kb: f64,
    /// Wall-clock time of the most recent background sweep
    pub last_cleanup: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hit rate as a rounded whole percentage.
    ///
    /// Returns 0 when no lookups have happened yet.
    pub fn hit_rate_percent(&self) -> u32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0
        } else {
            ((self.hits as f64 / total as f64) * 100.0).round() as u32
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Reset Counters ==
    /// Zeroes the hit/miss/eviction counters. `last_cleanup` is kept.
    pub fn reset_counters(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }

    // == Update Memory ==
    /// Recomputes the memory estimate from current tier sizes.
    pub fn update_memory(&mut self, pages: usize, searches: usize, buffered_logs: usize) {
        self.memory_usage_kb = estimate_kb(pages, searches, buffered_logs);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.memory_usage_kb, 0.0);
        assert!(stats.last_cleanup.is_none());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate_percent(), 0);
    }

    #[test]
    fn test_hit_rate_three_hits_one_miss() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate_percent(), 75);
    }

    #[test]
    fn test_hit_rate_rounds() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        // 1/3 -> 33.33% -> 33
        assert_eq!(stats.hit_rate_percent(), 33);

        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        // 2/3 -> 66.67% -> 67
        assert_eq!(stats.hit_rate_percent(), 67);
    }

    #[test]
    fn test_reset_counters() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();
        stats.last_cleanup = Some(chrono::Utc::now());

        stats.reset_counters();

        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert!(stats.last_cleanup.is_some());
    }

    #[test]
    fn test_memory_estimate() {
        assert_eq!(estimate_kb(0, 0, 0), 0.0);
        assert_eq!(estimate_kb(10, 0, 0), 500.0);
        assert_eq!(estimate_kb(0, 20, 0), 500.0);
        assert_eq!(estimate_kb(0, 0, 1000), 500.0);
        assert_eq!(estimate_kb(2, 3, 100), 100.0 + 75.0 + 50.0);
    }

    #[test]
    fn test_update_memory() {
        let mut stats = CacheStats::new();
        stats.update_memory(1, 1, 10);
        assert_eq!(stats.memory_usage_kb, 80.0);
    }
}
