//! Recent Log Buffer Module
//!
//! Newest-first bounded sequence of the most recently arrived log
//! records, independent of the page and search tiers.

use std::collections::VecDeque;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::error::TimestampError;

/// Field of a log record holding its own point in time.
const TIMESTAMP_FIELD: &str = "timestamp";

// == Record Timestamp ==
/// Reads the timestamp field of an opaque log record.
///
/// Accepts an RFC 3339 string or a Unix epoch in milliseconds (integer
/// or float). Callers on the trim path treat an error as "exempt from
/// retention trimming" rather than aborting the sweep.
pub fn record_timestamp(record: &Value) -> Result<DateTime<Utc>, TimestampError> {
    let field = record.get(TIMESTAMP_FIELD).ok_or(TimestampError::Missing)?;

    match field {
        Value::String(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|_| TimestampError::Unparseable(raw.clone())),
        Value::Number(raw) => {
            let millis = raw
                .as_i64()
                .or_else(|| raw.as_f64().map(|f| f as i64))
                .ok_or_else(|| TimestampError::Unparseable(raw.to_string()))?;
            Utc.timestamp_millis_opt(millis)
                .single()
                .ok_or_else(|| TimestampError::Unparseable(raw.to_string()))
        }
        other => Err(TimestampError::Unparseable(other.to_string())),
    }
}

// == Recent Log Buffer ==
/// Bounded newest-first buffer of raw log records.
#[derive(Debug)]
pub struct RecentLogBuffer {
    /// Records, newest at the front
    records: VecDeque<Value>,
    /// Maximum number of records kept
    capacity: usize,
}

impl RecentLogBuffer {
    // == Constructor ==
    /// Creates an empty buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    // == Add Batch ==
    /// Prepends a batch of records, preserving the batch's internal
    /// order, then truncates the tail back to capacity.
    pub fn add_batch(&mut self, batch: Vec<Value>) {
        for record in batch.into_iter().rev() {
            self.records.push_front(record);
        }
        self.records.truncate(self.capacity);
    }

    // == Recent ==
    /// Clones the first `limit` records (newest first). Returns the whole
    /// buffer when `limit` exceeds its length. Never mutates.
    pub fn recent(&self, limit: usize) -> Vec<Value> {
        self.records.iter().take(limit).cloned().collect()
    }

    // == Trim Older Than ==
    /// Drops every record whose own timestamp predates `cutoff`.
    ///
    /// Records with a missing or unparseable timestamp are kept. This is
    /// the sweep-time retention rule, additional to the capacity cap.
    ///
    /// Returns the number of records removed.
    pub fn trim_older_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.records.len();
        self.records.retain(|record| match record_timestamp(record) {
            Ok(timestamp) => timestamp >= cutoff,
            Err(_) => true,
        });
        before - self.records.len()
    }

    // == Clear ==
    /// Drops every buffered record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    // == Length ==
    /// Returns the current number of buffered records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
