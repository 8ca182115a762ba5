use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A cached value stamped with its fetch time
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: Arc<T>,
    fetched_at_ms: u64,
}

/// In-memory key-value store with a fixed time-to-live. Staleness is
/// evaluated lazily on read; there is no expiry sweep. Writes replace the
/// whole entry, so a read racing a write observes either the old or the new
/// value, never a partial one.
pub struct TtlCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
    ttl: Duration,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Look up a key. Returns the stored value together with a freshness
    /// flag; an entry is fresh only while `now - fetched_at < ttl`.
    pub fn get(&self, key: &str) -> Option<(Arc<T>, bool)> {
        self.entries.get(key).map(|entry| {
            let age = now_ms().saturating_sub(entry.fetched_at_ms);
            let fresh = age < self.ttl.as_millis() as u64;
            (Arc::clone(&entry.value), fresh)
        })
    }

    /// Store a value under a key, stamped with the current time
    pub fn insert(&self, key: impl Into<String>, value: T) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value: Arc::new(value),
                fetched_at_ms: now_ms(),
            },
        );
    }

    /// Drop every entry for every key
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a value with an explicit fetch time, for simulating clock
    /// advance in tests
    #[cfg(test)]
    pub(crate) fn insert_at(&self, key: impl Into<String>, value: T, fetched_at_ms: u64) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value: Arc::new(value),
                fetched_at_ms,
            },
        );
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
