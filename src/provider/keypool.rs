//! Credential pool with circular rotation.
//!
//! An explicit value rather than ambient process state, so tests can
//! construct a pool, drive it through controlled responses, and assert
//! on the final index. The index lives for the life of the pool and is
//! only reset by constructing a new one.

use std::sync::atomic::{AtomicUsize, Ordering};

/// An ordered pool of API credentials plus the current rotation index.
///
/// Rotation is circular; the index is always in `[0, len)` while the
/// pool is non-empty. Updates are atomic so concurrent requests cannot
/// lose rotations.
#[derive(Debug, Default)]
pub struct KeyPool {
    keys: Vec<String>,
    index: AtomicUsize,
}

impl KeyPool {
    /// Build a pool from credential strings. Entries are trimmed and
    /// blanks dropped; an empty pool is valid and simply never yields a
    /// key.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys
            .into_iter()
            .map(|k| k.into().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            keys,
            index: AtomicUsize::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Current rotation position.
    pub fn index(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    /// The credential at the current position, if any.
    pub fn current(&self) -> Option<&str> {
        let i = self.index.load(Ordering::Relaxed);
        self.keys.get(i).map(String::as_str)
    }

    /// Advance the index circularly to the next credential.
    pub fn advance(&self) {
        if self.keys.is_empty() {
            return;
        }
        let n = self.keys.len();
        // fetch_update keeps the index in-range under concurrent advances
        let _ = self
            .index
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |i| {
                Some((i + 1) % n)
            });
    }
}
