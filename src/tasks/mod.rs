//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the cache's lifetime.
//!
//! # Tasks
//! - Sweep: removes expired entries and over-age log records at configured intervals

mod cleanup;

pub use cleanup::{spawn_sweeper, SweeperHandle};
