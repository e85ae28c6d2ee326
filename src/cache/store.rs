//! Cache Store Module
//!
//! Response cache combining FIFO-bounded storage with lazy TTL expiration.

use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, FifoMap};
use crate::clock::current_timestamp_ms;

// == Cache Store ==
/// Bounded TTL cache with FIFO eviction.
///
/// Lazy expiry on read is authoritative; [`CacheStore::purge_expired`] only
/// reclaims memory for keys that are never read again.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage, oldest insertion first
    entries: FifoMap<CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: FifoMap::with_capacity(max_entries),
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a value for `ttl`, replacing any previous value for the key.
    ///
    /// A new key arriving at capacity evicts the oldest-inserted key first.
    /// An overwritten key keeps its original eviction position.
    pub fn set(&mut self, key: String, value: V, ttl: Duration) {
        self.set_at(key, value, ttl, current_timestamp_ms());
    }

    pub fn set_at(&mut self, key: String, value: V, ttl: Duration, now_ms: u64) {
        let entry = CacheEntry::new_at(value, ttl, now_ms);

        if let Some(evicted) = self.entries.insert(key, entry) {
            debug!(
                key = %evicted,
                capacity = self.entries.capacity(),
                "cache full, evicted oldest entry"
            );
            self.stats.record_eviction();
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed on the spot and reported as misses.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, current_timestamp_ms())
    }

    pub fn get_at(&mut self, key: &str, now_ms: u64) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now_ms),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(current_timestamp_ms())
    }

    pub fn purge_expired_at(&mut self, now_ms: u64) -> usize {
        let removed = self.entries.retain(|_, entry| !entry.is_expired_at(now_ms));

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: CacheStore<String> = CacheStore::new(100);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100);

        store.set("key1".to_string(), "value1".to_string(), MINUTE);

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_keeps_nested_values_intact() {
        let mut store = CacheStore::new(100);
        let value = json!({ "a": 1, "b": [2, 3], "c": { "d": "hello" } });

        store.set("object".to_string(), value.clone(), MINUTE);

        assert_eq!(store.get("object"), Some(value));
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100);

        store.set("key1".to_string(), "first".to_string(), MINUTE);
        store.set("key1".to_string(), "second".to_string(), MINUTE);

        assert_eq!(store.get("key1"), Some("second".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100);

        store.set_at("key1".to_string(), "value1", Duration::from_secs(1), 10_000);

        assert_eq!(store.get_at("key1", 10_500), Some("value1"));
        assert_eq!(store.get_at("key1", 11_000), Some("value1"));
        assert_eq!(store.get_at("key1", 11_001), None);

        // The lazy read removed it.
        assert!(store.is_empty());
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_ttl_expiration_wall_clock() {
        let mut store = CacheStore::new(100);

        store.set("key1".to_string(), "value1", Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_fifo_eviction() {
        let mut store = CacheStore::new(3);

        store.set("key1".to_string(), 1, MINUTE);
        store.set("key2".to_string(), 2, MINUTE);
        store.set("key3".to_string(), 3, MINUTE);

        // Reads do not refresh eviction order.
        assert_eq!(store.get("key1"), Some(1));

        store.set("key4".to_string(), 4, MINUTE);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.get("key2"), Some(2));
        assert_eq!(store.get("key4"), Some(4));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_thousand_and_first_key_evicts_first() {
        let mut store = CacheStore::new(1_000);

        for i in 0..1_000 {
            store.set(format!("fifo-{i}"), format!("value-{i}"), MINUTE);
        }
        assert_eq!(store.get("fifo-0"), Some("value-0".to_string()));

        store.set("fifo-1000".to_string(), "overflow".to_string(), MINUTE);

        assert_eq!(store.get("fifo-0"), None);
        assert_eq!(store.get("fifo-1"), Some("value-1".to_string()));
        assert_eq!(store.get("fifo-1000"), Some("overflow".to_string()));
        assert_eq!(store.len(), 1_000);
    }

    #[test]
    fn test_store_overwritten_key_survives_filling_remaining_slots() {
        let mut store = CacheStore::new(1_000);

        store.set("target".to_string(), "initial".to_string(), MINUTE);
        store.set("target".to_string(), "updated".to_string(), MINUTE);

        for i in 0..999 {
            store.set(format!("fill-{i}"), format!("v{i}"), MINUTE);
        }

        assert_eq!(store.len(), 1_000);
        assert_eq!(store.get("target"), Some("updated".to_string()));
    }

    #[test]
    fn test_store_overwrite_does_not_refresh_eviction_slot() {
        let mut store = CacheStore::new(2);

        store.set("a".to_string(), 1, MINUTE);
        store.set("b".to_string(), 2, MINUTE);
        store.set("a".to_string(), 10, MINUTE);
        store.set("c".to_string(), 3, MINUTE);

        // "a" kept its first slot, so it goes before "b".
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(2));
        assert_eq!(store.get("c"), Some(3));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100);

        store.set("key1".to_string(), "value1", MINUTE);
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_purge_expired() {
        let mut store = CacheStore::new(100);

        store.set_at("short".to_string(), "a", Duration::from_secs(1), 0);
        store.set_at("long".to_string(), "b", Duration::from_secs(10), 0);

        let removed = store.purge_expired_at(2_000);

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_at("long", 2_000), Some("b"));
    }

    #[test]
    fn test_purge_never_changes_get_outcome() {
        let mut swept = CacheStore::new(10);
        let mut lazy = CacheStore::new(10);

        for store in [&mut swept, &mut lazy] {
            store.set_at("a".to_string(), 1, Duration::from_secs(1), 0);
            store.set_at("b".to_string(), 2, Duration::from_secs(5), 0);
        }

        swept.purge_expired_at(3_000);

        for key in ["a", "b", "c"] {
            assert_eq!(swept.get_at(key, 3_000), lazy.get_at(key, 3_000));
        }
    }
}
