//! Fingerprint-keyed cache for list-search results.
//!
//! The store is a single JSON document mapping query fingerprints to
//! `{timestamp, payload}` entries. A write fully replaces the entry for
//! its key (last-write-wins, no merge), and only happens after a result
//! has been fully computed, so partial entries are never visible.
//!
//! Reads distinguish "missing" from "corrupt" internally — corrupt
//! stores are logged and counted — but both degrade to a miss.
//! Read-modify-write of the document is a critical section guarded by a
//! mutex so concurrent writers cannot lose each other's entries.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::telemetry;
use crate::types::RecipeSummary;

use super::unix_now;

/// A cached list result: creation stamp plus the full payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Seconds since the Unix epoch at creation time.
    pub timestamp: u64,
    pub payload: Vec<RecipeSummary>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDoc {
    #[serde(default)]
    items: HashMap<String, CacheEntry>,
}

enum StoreRead {
    Loaded(StoreDoc),
    Missing,
    Corrupt,
}

/// Compute the cache key for a list-search request.
///
/// Deterministic and order-independent: built from the sorted,
/// lower-cased, deduplicated ingredient names, the normalized diet (or
/// "none"), and the requested result count. Two calls for the same
/// logical query map to the same key regardless of input ordering or
/// casing.
pub fn fingerprint(ingredients: &[String], diet: Option<&str>, number: usize) -> String {
    let mut names: Vec<String> = ingredients
        .iter()
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();
    names.sort();
    names.dedup();
    format!(
        "{}|{}|{}",
        names.join(","),
        diet.unwrap_or("none").to_lowercase(),
        number
    )
}

/// Freshness as a pure function of `(timestamp, now, ttl)`.
///
/// The boundary is inclusive: an entry aged exactly `ttl` is still fresh.
pub fn is_fresh(timestamp: u64, now: u64, ttl: Duration) -> bool {
    now.saturating_sub(timestamp) <= ttl.as_secs()
}

/// Disk-backed cache for list-search results.
pub struct ListCache {
    path: PathBuf,
    ttl: Duration,
    write_lock: Mutex<()>,
}

impl ListCache {
    /// Create a cache over the given store file with a uniform TTL.
    pub fn new(path: PathBuf, ttl: Duration) -> Self {
        Self {
            path,
            ttl,
            write_lock: Mutex::new(()),
        }
    }

    /// Look up an entry by key, fresh or stale.
    ///
    /// Returns `None` on miss, on a missing store, and on a corrupt
    /// store. Callers check freshness via [`ListCache::fresh`]; stale
    /// entries are still returned so the fallback chain can serve them.
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        let doc = match self.read_store().await {
            StoreRead::Loaded(doc) => doc,
            StoreRead::Missing | StoreRead::Corrupt => StoreDoc::default(),
        };
        match doc.items.get(key) {
            Some(entry) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => "list").increment(1);
                Some(entry.clone())
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => "list").increment(1);
                None
            }
        }
    }

    /// Whether an entry is fresh under this cache's TTL.
    pub fn fresh(&self, entry: &CacheEntry) -> bool {
        is_fresh(entry.timestamp, unix_now(), self.ttl)
    }

    /// Write a payload under `key`, stamped at the current time.
    ///
    /// Replaces any existing entry for the key. Persistence failures are
    /// logged and swallowed — a cache that cannot be written must not
    /// fail the request that produced the payload.
    pub async fn put(&self, key: &str, payload: Vec<RecipeSummary>) {
        let _guard = self.write_lock.lock().await;
        let mut doc = match self.read_store().await {
            StoreRead::Loaded(doc) => doc,
            StoreRead::Missing | StoreRead::Corrupt => StoreDoc::default(),
        };
        doc.items.insert(
            key.to_string(),
            CacheEntry {
                timestamp: unix_now(),
                payload,
            },
        );
        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!(path = %self.path.display(), error = %e, "cannot create cache directory");
                return;
            }
        }
        match serde_json::to_vec_pretty(&doc) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&self.path, bytes).await {
                    warn!(path = %self.path.display(), error = %e, "cache write failed");
                }
            }
            Err(e) => warn!(error = %e, "cache serialization failed"),
        }
    }

    async fn read_store(&self) -> StoreRead {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "list cache store not present");
                return StoreRead::Missing;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "list cache store unreadable");
                metrics::counter!(telemetry::CACHE_CORRUPT_TOTAL, "cache" => "list").increment(1);
                return StoreRead::Corrupt;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(doc) => StoreRead::Loaded(doc),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "list cache store malformed");
                metrics::counter!(telemetry::CACHE_CORRUPT_TOTAL, "cache" => "list").increment(1);
                StoreRead::Corrupt
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fingerprint_ignores_ordering_and_case() {
        let a = fingerprint(&names(&["Egg", "Milk"]), Some("vegan"), 10);
        let b = fingerprint(&names(&["milk", "egg"]), Some("Vegan"), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_deduplicates() {
        let a = fingerprint(&names(&["egg", "Egg", "milk"]), None, 5);
        let b = fingerprint(&names(&["milk", "egg"]), None, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_drops_blank_names() {
        let a = fingerprint(&names(&["egg", "  ", ""]), None, 5);
        let b = fingerprint(&names(&["egg"]), None, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_distinguishes_diet_and_count() {
        let base = fingerprint(&names(&["egg"]), None, 10);
        assert_ne!(base, fingerprint(&names(&["egg"]), Some("vegan"), 10));
        assert_ne!(base, fingerprint(&names(&["egg"]), None, 5));
    }

    #[test]
    fn freshness_boundary_is_inclusive() {
        let ttl = Duration::from_secs(3 * 24 * 3600);
        let now = 1_700_000_000;
        assert!(is_fresh(now, now, ttl));
        assert!(is_fresh(now - ttl.as_secs(), now, ttl));
        assert!(!is_fresh(now - ttl.as_secs() - 1, now, ttl));
    }

    #[test]
    fn future_timestamps_count_as_fresh() {
        // A clock that moved backwards must not expire everything.
        let ttl = Duration::from_secs(60);
        assert!(is_fresh(200, 100, ttl));
    }
}
