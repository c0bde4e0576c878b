//! Cache Tier Module
//!
//! Bounded key-value tier with TTL expiration, shared by the page and
//! search caches. Eviction is FIFO by last-write timestamp: at capacity
//! the entry with the smallest `stored_at` goes, regardless of how
//! recently it was read. A linear scan is fine at these bounds (<= 20).

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::cache::CacheEntry;

// == Tier Store ==
/// One bounded cache tier holding opaque payloads under canonical keys.
#[derive(Debug)]
pub struct TierStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<Value>>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Age at which an entry becomes stale
    ttl: Duration,
}

impl TierStore {
    // == Constructor ==
    /// Creates an empty tier with the given capacity and TTL.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            ttl,
        }
    }

    // == Get ==
    /// Looks up a payload by canonical key.
    ///
    /// Returns `None` if the key is absent or the entry's age has reached
    /// the TTL. Expired entries are left in place: only the sweep or
    /// capacity pressure removes them (lazy invalidation).
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<&Value> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| &entry.data)
    }

    // == Insert ==
    /// Stores a payload under the given key.
    ///
    /// Overwriting an existing key replaces the entry and refreshes its
    /// timestamp without counting toward capacity. A genuinely new key at
    /// capacity first evicts the entry with the smallest `stored_at`
    /// across the whole tier.
    ///
    /// Returns `true` if an entry was evicted to make room.
    pub fn insert(&mut self, key: String, data: Value, now: DateTime<Utc>) -> bool {
        let is_overwrite = self.entries.contains_key(&key);
        let mut evicted = false;

        if !is_overwrite && self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());

            if let Some(oldest_key) = oldest {
                self.entries.remove(&oldest_key);
                evicted = true;
            }
        }

        self.entries.insert(key, CacheEntry::new(data, now));
        evicted
    }

    // == Clear ==
    /// Drops every entry in the tier.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Sweep ==
    /// Physically removes all entries whose age has reached the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_expired(now, ttl));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the tier holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Keys ==
    /// Canonical keys currently held, sorted for stable output.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}
