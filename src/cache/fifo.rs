//! FIFO Map Module
//!
//! Insertion-ordered map with a hard capacity, shared by the response cache
//! and the rate-limit window store.

use indexmap::IndexMap;

// == FIFO Map ==
/// Bounded map that evicts the oldest-inserted key when full.
///
/// Overwriting a present key replaces its value in place: the key keeps the
/// slot it got on first insertion and is not moved to the back.
#[derive(Debug)]
pub struct FifoMap<V> {
    /// Entries, oldest first
    entries: IndexMap<String, V>,
    /// Maximum number of keys held at once
    capacity: usize,
}

impl<V> FifoMap<V> {
    // == Constructor ==
    /// Creates an empty map holding at most `capacity` keys (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: IndexMap::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    // == Insert ==
    /// Upserts `key`, returning the key evicted to make room, if any.
    ///
    /// Eviction only happens when `key` is new and the map is full.
    pub fn insert(&mut self, key: String, value: V) -> Option<String> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0).map(|(oldest, _)| oldest)
        } else {
            None
        };

        self.entries.insert(key, value);
        evicted
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    // == Remove ==
    /// Removes a key, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.shift_remove(key)
    }

    // == Retain ==
    /// Keeps only the entries matching `keep`; returns how many were dropped.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str, &V) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|key, value| keep(key.as_str(), &*value));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
