//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

use crate::cache::{
    ENTRY_TTL_SECS, LOG_RETENTION_SECS, MAX_BUFFERED_LOGS, MAX_PAGES_CACHED,
    MAX_SEARCHES_CACHED, SWEEP_INTERVAL_SECS,
};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached page listings
    pub max_pages: usize,
    /// Maximum number of cached search results
    pub max_searches: usize,
    /// Maximum number of log records held in the recent buffer
    pub max_buffered_logs: usize,
    /// TTL in seconds for page and search entries
    pub entry_ttl_secs: u64,
    /// Retention in seconds for buffered log records (by their own timestamp)
    pub log_retention_secs: u64,
    /// Background sweep interval in seconds
    pub sweep_interval_secs: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LOG_CACHE_MAX_PAGES` - Maximum cached pages (default: 10)
    /// - `LOG_CACHE_MAX_SEARCHES` - Maximum cached searches (default: 20)
    /// - `LOG_CACHE_MAX_LOGS` - Maximum buffered log records (default: 1000)
    /// - `LOG_CACHE_TTL_SECS` - Entry TTL in seconds (default: 120)
    /// - `LOG_CACHE_RETENTION_SECS` - Buffer retention in seconds (default: 3600)
    /// - `LOG_CACHE_SWEEP_SECS` - Sweep frequency in seconds (default: 300)
    pub fn from_env() -> Self {
        Self {
            max_pages: env::var("LOG_CACHE_MAX_PAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_PAGES_CACHED),
            max_searches: env::var("LOG_CACHE_MAX_SEARCHES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_SEARCHES_CACHED),
            max_buffered_logs: env::var("LOG_CACHE_MAX_LOGS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_BUFFERED_LOGS),
            entry_ttl_secs: env::var("LOG_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(ENTRY_TTL_SECS),
            log_retention_secs: env::var("LOG_CACHE_RETENTION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(LOG_RETENTION_SECS),
            sweep_interval_secs: env::var("LOG_CACHE_SWEEP_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(SWEEP_INTERVAL_SECS),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_pages: MAX_PAGES_CACHED,
            max_searches: MAX_SEARCHES_CACHED,
            max_buffered_logs: MAX_BUFFERED_LOGS,
            entry_ttl_secs: ENTRY_TTL_SECS,
            log_retention_secs: LOG_RETENTION_SECS,
            sweep_interval_secs: SWEEP_INTERVAL_SECS,
        }
    }
}
