//! Cache abstraction layer for seqdraw.
//!
//! This crate provides a small caching trait that decouples cache consumers
//! from the underlying storage policy:
//!
//! - [`CacheStore`]: Key-value store with expiry sweep and bulk invalidation
//!
//! # Implementations
//!
//! - [`NullCache`]: No-op implementation (always miss)
//! - [`MemoryCache`]: In-memory store with optional TTL and LRU eviction
//!
//! Keys are plain strings. Callers derive them from content with
//! [`content_hash`], which is a fast 32-bit hash and not collision-free:
//! caches built on it are a performance optimization only.
//!
//! # Example
//!
//! ```
//! use seqdraw_cache::{CacheStore, MemoryCache, NullCache};
//!
//! let cache = MemoryCache::new(2);
//! cache.set("a", 1);
//! assert_eq!(cache.get("a"), Some(1));
//!
//! let disabled = NullCache;
//! disabled.set("a", 1);
//! assert_eq!(CacheStore::<i32>::get(&disabled, "a"), None); // NullCache always misses
//! ```

mod hash;
mod memory;

pub use hash::content_hash;
pub use memory::MemoryCache;

/// A bounded key-value store.
///
/// Stored values are handed out as clones; entries are replaced wholesale on
/// update and never mutated in place.
pub trait CacheStore<T>: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `None` on miss. An expired entry is removed and reported as a
    /// miss.
    fn get(&self, key: &str) -> Option<T>;

    /// Store a value, replacing any existing entry for the same key.
    fn set(&self, key: &str, value: T);

    /// Drop all entries.
    fn clear(&self);

    /// Remove every expired entry, returning how many were dropped.
    fn cleanup(&self) -> usize;

    /// Number of resident entries (expired entries not yet swept included).
    fn len(&self) -> usize;

    /// Whether the store holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// No-op [`CacheStore`] that never stores or retrieves data.
///
/// Use when caching is disabled. All operations are no-ops and all lookups
/// return `None`.
pub struct NullCache;

impl<T> CacheStore<T> for NullCache {
    fn get(&self, _key: &str) -> Option<T> {
        None
    }

    fn set(&self, _key: &str, _value: T) {}

    fn clear(&self) {}

    fn cleanup(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cache_always_misses() {
        let cache = NullCache;

        // A fresh store has no data
        assert_eq!(CacheStore::<String>::get(&cache, "key"), None);

        // Setting a value and reading it back still returns None
        cache.set("key", "hello".to_owned());
        assert_eq!(CacheStore::<String>::get(&cache, "key"), None);
        assert!(CacheStore::<String>::is_empty(&cache));
    }

    #[test]
    fn test_null_cache_as_trait_object() {
        let cache: Box<dyn CacheStore<u32>> = Box::new(NullCache);

        for key in &["validation", "render", "meta"] {
            cache.set(key, 7);
            assert_eq!(cache.get(key), None, "key {key} should miss");
        }
        assert_eq!(cache.cleanup(), 0);
    }
}
