use std::collections::{ BTreeMap, HashMap };

use crate::errors::CoindataError;

/// Default capacity when none is configured (matches CACHE_MAX_SIZE default).
pub const DEFAULT_CAPACITY: usize = 100;

/// A stored value together with how often it has been accessed.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    frequency: u64,
}

/// Tracks, for each access frequency currently in use, how many live entries
/// hold that frequency. Answers "what is the minimum frequency right now"
/// without scanning every entry.
///
/// Invariant: a frequency is removed from the map the moment its count
/// reaches zero, so the smallest key is always the live minimum.
#[derive(Debug, Default)]
struct FrequencyBuckets {
    counts: BTreeMap<u64, usize>,
}

impl FrequencyBuckets {
    /// Record a brand-new entry at the given frequency.
    fn insert(&mut self, frequency: u64) {
        *self.counts.entry(frequency).or_insert(0) += 1;
    }

    /// Remove one entry from the given frequency bucket.
    fn remove(&mut self, frequency: u64) {
        if let Some(count) = self.counts.get_mut(&frequency) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&frequency);
            }
        }
    }

    /// Move one entry from bucket `frequency` to bucket `frequency + 1`.
    fn promote(&mut self, frequency: u64) {
        self.remove(frequency);
        self.insert(frequency + 1);
    }

    /// Smallest frequency with a nonzero count, None when no entries live.
    fn min_frequency(&self) -> Option<u64> {
        self.counts.keys().next().copied()
    }

    fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Bounded key/value cache with least-frequently-used eviction.
///
/// Each entry tracks how many times it has been read or rewritten; when a new
/// key arrives at capacity, the entry with the smallest access count is
/// evicted. Ties are broken by insertion order: among entries sharing the
/// minimum frequency, the one resident longest goes first.
///
/// The cache performs no I/O and never logs. Callers sharing one instance
/// across tasks must wrap it in a single mutex so that each get/set is atomic.
#[derive(Debug)]
pub struct LfuCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    // Keys in original insertion order; drives eviction tie-breaking.
    insertion_order: Vec<String>,
    buckets: FrequencyBuckets,
    capacity: usize,
}

impl<V: Clone> LfuCache<V> {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// Capacity zero is rejected rather than clamped: such a cache could
    /// never retain anything and every insert would evict from an empty map.
    pub fn new(capacity: usize) -> Result<Self, CoindataError> {
        if capacity == 0 {
            return Err(CoindataError::ZeroCacheCapacity);
        }
        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            insertion_order: Vec::with_capacity(capacity),
            buckets: FrequencyBuckets::default(),
            capacity,
        })
    }

    /// Look up `key`, counting the read as one access.
    ///
    /// A miss leaves the cache untouched. A hit bumps the entry's frequency
    /// by one and returns a clone of the stored value.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.get_mut(key)?;
        self.buckets.promote(entry.frequency);
        entry.frequency += 1;
        Some(entry.value.clone())
    }

    /// Insert or replace `key`.
    ///
    /// Rewriting a present key replaces its value and counts as one access,
    /// exactly like a read; it never evicts. A new key at capacity evicts
    /// the least-frequently-used entry first, then lands with frequency 1.
    pub fn set(&mut self, key: &str, value: V) {
        if let Some(entry) = self.entries.get_mut(key) {
            self.buckets.promote(entry.frequency);
            entry.frequency += 1;
            entry.value = value;
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict();
        }

        self.entries.insert(key.to_string(), CacheEntry { value, frequency: 1 });
        self.insertion_order.push(key.to_string());
        self.buckets.insert(1);
    }

    /// Remove the earliest-inserted entry holding the minimum frequency.
    /// Safe no-op on an empty cache.
    fn evict(&mut self) {
        let Some(min_frequency) = self.buckets.min_frequency() else {
            return;
        };

        let victim = self.insertion_order
            .iter()
            .position(|key| {
                self.entries
                    .get(key)
                    .map(|entry| entry.frequency == min_frequency)
                    .unwrap_or(false)
            });

        if let Some(index) = victim {
            let key = self.insertion_order.remove(index);
            self.entries.remove(&key);
            self.buckets.remove(min_frequency);
        }
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

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
