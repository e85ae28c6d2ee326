//! Cache Statistics Module
//!
//! Counters reported by `GET /stats` for the response cache.

use serde::Serialize;

// == Cache Stats ==
/// Running counters for one [`crate::cache::CacheStore`].
///
/// Counters only grow; `total_entries` is a snapshot refreshed on every
/// mutation of the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a live entry
    pub hits: u64,
    /// Lookups that found nothing, or only a stale entry
    pub misses: u64,
    /// New keys that pushed the oldest key out
    pub evictions: u64,
    /// Entries dropped because their TTL elapsed, lazily or by the sweep
    pub expirations: u64,
    /// Keys currently stored
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Share of lookups served from the cache, in `0.0..=1.0`.
    ///
    /// 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expirations ==
    /// Adds `count` expired entries, as removed by one lookup or one sweep.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Set Total Entries ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
