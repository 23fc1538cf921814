//! Bounded response cache with FIFO eviction.
//!
//! Maps a raw query string to the response computed for it. When full, the
//! oldest *inserted* entry is evicted; lookups do not refresh an entry's
//! position. The map and the eviction queue are kept in lockstep: every
//! cached key occurs exactly once in the queue.
//!
//! The cache itself is not synchronized. The server shares it as
//! `Mutex<ResponseCache>` and takes the lock for lookups and inserts alike.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

/// Default number of responses kept.
pub const DEFAULT_CAPACITY: usize = 10;

/// Hit/miss/eviction counters plus current occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub len: usize,
    pub capacity: usize,
}

#[derive(Debug)]
pub struct ResponseCache {
    capacity: usize,
    entries: HashMap<String, String>,
    /// Keys in insertion order, oldest at the front.
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl ResponseCache {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is bumped to one; configuration validation rejects
    /// it before it gets here.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Look up a cached response. Does not change eviction order.
    pub fn lookup(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a response, evicting the oldest entry if the cache is full.
    ///
    /// Re-inserting a key that is already cached overwrites its value and
    /// keeps its existing queue slot. This departs from a naive map-plus-queue
    /// cache, which would queue the key a second time and later evict one
    /// entry too many. Two handlers that miss on the same query concurrently
    /// both insert; the second insert is such an overwrite with an identical
    /// value.
    pub fn insert(&mut self, key: String, value: String) {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                self.evictions += 1;
                trace!(key = %oldest, "evicted cached response");
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
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

    /// Cached keys from oldest to newest insertion.
    pub fn keys_in_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            len: self.entries.len(),
            capacity: self.capacity,
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
