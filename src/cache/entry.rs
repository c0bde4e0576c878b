//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with age tracking.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// A stored payload together with the time it was written.
///
/// Entries are immutable once stored: overwriting a key replaces the
/// whole entry, which also refreshes its timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored payload
    pub data: T,
    /// When the entry was written
    pub stored_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stamped with the given write time.
    pub fn new(data: T, stored_at: DateTime<Utc>) -> Self {
        Self { data, stored_at }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.stored_at
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived its TTL.
    ///
    /// Boundary condition: an entry is expired once its age is greater
    /// than or equal to the TTL, so an entry exactly at the TTL boundary
    /// is already stale.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }
}
