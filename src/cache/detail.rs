//! Per-recipe detail store.
//!
//! Detail content is treated as immutable for a given id, so entries
//! never expire: the durable layer is one JSON document per id, and a
//! moka cache in front of it saves re-reading the same file while the
//! process lives. A disk read failure of any kind degrades to "absent".

use std::path::PathBuf;

use moka::future::Cache;
use tracing::warn;

use crate::telemetry;
use crate::types::RecipeDetail;

/// Default capacity of the in-memory layer.
const DEFAULT_MEMORY_ENTRIES: u64 = 1_000;

/// Disk-backed store for recipe details with a read-through memory layer.
pub struct DetailStore {
    dir: PathBuf,
    memory: Cache<u64, RecipeDetail>,
}

impl DetailStore {
    /// Create a store rooted at `dir` (one `<id>.json` file per recipe).
    pub fn new(dir: PathBuf) -> Self {
        Self::with_capacity(dir, DEFAULT_MEMORY_ENTRIES)
    }

    /// Create a store with an explicit in-memory capacity.
    pub fn with_capacity(dir: PathBuf, max_entries: u64) -> Self {
        Self {
            dir,
            memory: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    /// Look up a detail record by id.
    pub async fn get(&self, id: u64) -> Option<RecipeDetail> {
        if let Some(detail) = self.memory.get(&id).await {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => "detail").increment(1);
            return Some(detail);
        }
        match self.read_disk(id).await {
            Some(detail) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => "detail").increment(1);
                self.memory.insert(id, detail.clone()).await;
                Some(detail)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => "detail").increment(1);
                None
            }
        }
    }

    /// Persist a detail record (memory and disk).
    ///
    /// Disk failures are logged and swallowed; the in-memory copy still
    /// serves the current process.
    pub async fn put(&self, detail: &RecipeDetail) {
        self.memory.insert(detail.id, detail.clone()).await;
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), error = %e, "cannot create detail store directory");
            return;
        }
        let path = self.entry_path(detail.id);
        match serde_json::to_vec_pretty(detail) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&path, bytes).await {
                    warn!(path = %path.display(), error = %e, "detail write failed");
                }
            }
            Err(e) => warn!(error = %e, "detail serialization failed"),
        }
    }

    fn entry_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn read_disk(&self, id: u64) -> Option<RecipeDetail> {
        let path = self.entry_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "detail store unreadable");
                metrics::counter!(telemetry::CACHE_CORRUPT_TOTAL, "cache" => "detail").increment(1);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "detail store malformed");
                metrics::counter!(telemetry::CACHE_CORRUPT_TOTAL, "cache" => "detail").increment(1);
                None
            }
        }
    }
}
