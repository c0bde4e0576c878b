//! Log View Cache - an in-memory caching layer for log viewing
//!
//! Shields a log viewer from redundant fetches by holding paginated
//! listing results, search results, and a rolling buffer of the most
//! recent log records, each with TTL expiration and bounded capacity.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, DebugInfo, LogCache, SweepSummary};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use tasks::{spawn_sweeper, SweeperHandle};
