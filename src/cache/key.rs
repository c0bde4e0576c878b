//! Cache Key Module
//!
//! Canonicalizes a page number or query string plus an unordered option
//! mapping into a deterministic string key. Two mappings holding the same
//! key/value pairs produce the same key regardless of insertion order.

use serde_json::{Map, Value};

/// Delimiter between rendered option pairs.
const PAIR_DELIMITER: &str = "|";

// == Page Key ==
/// Builds the canonical key for a paginated listing.
///
/// Format: `page_<n>_<sorted options>`. An empty filter mapping yields an
/// empty suffix, not an error.
pub fn page_key(page: u32, filters: &Map<String, Value>) -> String {
    format!("page_{}_{}", page, options_suffix(filters))
}

// == Search Key ==
/// Builds the canonical key for a search result.
///
/// Format: `search_<query>_<sorted options>`.
pub fn search_key(query: &str, options: &Map<String, Value>) -> String {
    format!("search_{}_{}", query, options_suffix(options))
}

// == Option Suffix ==
/// Renders an option mapping as `key:value` pairs, sorted by key and
/// joined with a fixed delimiter.
fn options_suffix(options: &Map<String, Value>) -> String {
    let mut pairs: Vec<(&String, &Value)> = options.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    pairs
        .iter()
        .map(|(key, value)| format!("{}:{}", key, stringify(value)))
        .collect::<Vec<_>>()
        .join(PAIR_DELIMITER)
}

// == Stringify ==
/// Deterministic rendering of any JSON value.
///
/// Strings render raw (no quotes); nested objects render with sorted
/// keys, so even unusual option values canonicalize to a stable key.
/// Total: there is no value this function fails on.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(stringify).collect();
            format!("[{}]", inner.join(","))
        }
        Value::Object(map) => {
            let mut pairs: Vec<(&String, &Value)> = map.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));
            let inner: Vec<String> = pairs
                .iter()
                .map(|(key, value)| format!("{}:{}", key, stringify(value)))
                .collect();
            format!("{{{}}}", inner.join(","))
        }
    }
}
