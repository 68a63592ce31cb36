//! In-memory cache implementation.
//!
//! [`MemoryCache`] keeps entries in an insertion-ordered map. Map order is
//! recency order: the front holds the least recently inserted or accessed
//! entry, so eviction pops the front. A hit moves the entry to the back.
//!
//! ```text
//! [oldest] ... [most recent]
//!    ^ evicted first when full
//! ```
//!
//! Entries optionally expire `ttl` after insertion. Expired entries are
//! dropped lazily on [`get`](CacheStore::get) or eagerly by
//! [`cleanup`](CacheStore::cleanup).

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::CacheStore;

/// One cache slot.
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

/// Size-bounded in-memory [`CacheStore`] with optional TTL.
pub struct MemoryCache<T> {
    entries: Mutex<IndexMap<String, CacheEntry<T>>>,
    max_entries: usize,
    ttl: Option<Duration>,
}

impl<T> MemoryCache<T> {
    /// Create a cache holding at most `max_entries` entries, without expiry.
    ///
    /// A capacity of zero stores nothing.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
            max_entries,
            ttl: None,
        }
    }

    /// Expire entries `ttl` after insertion.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Configured time-to-live, if any.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    // A panic while holding the lock cannot leave a half-written entry:
    // every mutation is a single map operation.
    fn lock(&self) -> MutexGuard<'_, IndexMap<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_expired(&self, entry: &CacheEntry<T>, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.saturating_duration_since(entry.stored_at) > ttl)
    }
}

impl<T: Clone + Send> CacheStore<T> for MemoryCache<T> {
    fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.lock();
        let entry = entries.shift_remove(key)?;

        if self.is_expired(&entry, Instant::now()) {
            tracing::trace!(key, "cache entry expired");
            return None;
        }

        // Re-insert at the back to refresh recency
        let value = entry.value.clone();
        entries.insert(key.to_owned(), entry);
        Some(value)
    }

    fn set(&self, key: &str, value: T) {
        if self.max_entries == 0 {
            return;
        }

        let mut entries = self.lock();
        if entries.shift_remove(key).is_none()
            && entries.len() >= self.max_entries
            && let Some((evicted, _)) = entries.shift_remove_index(0)
        {
            tracing::trace!(key = %evicted, "cache entry evicted");
        }
        entries.insert(
            key.to_owned(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "swept expired cache entries");
        }
        removed
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use std::thread::sleep;

    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache = MemoryCache::new(10);

        cache.set("my-key", "value".to_owned());
        assert_eq!(cache.get("my-key"), Some("value".to_owned()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent_key() {
        let cache: MemoryCache<u32> = MemoryCache::new(10);

        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let cache = MemoryCache::new(10);

        cache.set("key", 1);
        cache.set("key", 2);

        assert_eq!(cache.get("key"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evicts_oldest_inserted_when_full() {
        let cache = MemoryCache::new(2);

        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_hit_refreshes_recency() {
        let cache = MemoryCache::new(2);

        cache.set("a", 1);
        cache.set("b", 2);
        // Touch "a" so "b" becomes the oldest
        assert_eq!(cache.get("a"), Some(1));
        cache.set("c", 3);

        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let cache = MemoryCache::new(2);

        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 10);

        assert_eq!(cache.get("a"), Some(10));
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let cache = MemoryCache::new(0);

        cache.set("a", 1);

        assert_eq!(cache.get("a"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entry_is_miss_and_removed() {
        let cache = MemoryCache::new(10).with_ttl(Duration::from_millis(10));

        cache.set("key", 1);
        assert_eq!(cache.get("key"), Some(1));

        sleep(Duration::from_millis(30));

        assert_eq!(cache.get("key"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let cache = MemoryCache::new(10);

        cache.set("key", 1);
        sleep(Duration::from_millis(5));

        assert_eq!(cache.get("key"), Some(1));
        assert_eq!(cache.ttl(), None);
    }

    #[test]
    fn test_cleanup_sweeps_expired_entries() {
        let cache = MemoryCache::new(10).with_ttl(Duration::from_millis(10));

        cache.set("old-1", 1);
        cache.set("old-2", 2);
        sleep(Duration::from_millis(30));
        cache.set("fresh", 3);

        assert_eq!(cache.cleanup(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh"), Some(3));
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = MemoryCache::new(10);

        cache.set("a", 1);
        cache.set("b", 2);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_config_accessors() {
        let cache: MemoryCache<u8> = MemoryCache::new(50).with_ttl(Duration::from_secs(300));

        assert_eq!(cache.max_entries(), 50);
        assert_eq!(cache.ttl(), Some(Duration::from_secs(300)));
    }
}
