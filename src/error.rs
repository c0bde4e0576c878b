//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Ordinary misses are not errors: absence and expiry both resolve to
//! `None` on the lookup path. The only fallible operation is extracting
//! a timestamp from an opaque log record, and even that failure is
//! handled by exempting the record from retention trimming.

use thiserror::Error;

// == Timestamp Error Enum ==
/// Failure to read the timestamp field of a log record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The record carries no timestamp field at all
    #[error("log record has no timestamp field")]
    Missing,

    /// The timestamp field could not be parsed as a point in time
    #[error("unparseable timestamp: {0}")]
    Unparseable(String),
}
