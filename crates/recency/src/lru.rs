//! LRU (Least Recently Used) cache implementation
//!
//! Composes the entry store, the recency list and the key index. Every
//! operation except iteration and clearing is O(1).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use tracing::{debug, trace};

use crate::error::{ConfigError, Result};
use crate::index::KeyIndex;
use crate::list::RecencyList;
use crate::stats::CacheStats;
use crate::store::{EntryStore, Handle, MAX_ENTRIES, PREALLOCATE_LIMIT};

/// LRU cache with fixed capacity
///
/// Reads promote the entry they hit, so [`get`](LruCache::get) takes
/// `&mut self` just like [`put`](LruCache::put). Sharing a cache between
/// threads means wrapping the whole cache in one lock.
pub struct LruCache<K, V> {
    store: EntryStore<K, V>,
    list: RecencyList,
    index: KeyIndex<K>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `ConfigError::NonPositiveCapacity` - if `capacity` is zero
    /// * `ConfigError::CapacityTooLarge` - if the slots could not be addressed
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ConfigError::NonPositiveCapacity(capacity));
        }
        if capacity > MAX_ENTRIES {
            return Err(ConfigError::CapacityTooLarge(capacity));
        }

        debug!(capacity, "creating LRU cache");
        let reserve = capacity.min(PREALLOCATE_LIMIT);
        Ok(Self {
            store: EntryStore::with_capacity(reserve),
            list: RecencyList::new(),
            index: KeyIndex::with_capacity(reserve),
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Create a new LRU cache from a capacity known to be non-zero
    ///
    /// # Panics
    /// If `capacity` exceeds the addressable slot count (about 4 billion).
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        match Self::new(capacity.get()) {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.touch(key)?;
        Some(self.store.get(handle).1)
    }

    /// Get a mutable reference to a value, marking it most recently used
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.touch(key)?;
        Some(self.store.value_mut(handle))
    }

    /// Get a value without changing its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.lookup(key)?;
        Some(self.store.get(handle).1)
    }

    /// Check for a key without changing its recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.lookup(key).is_some()
    }

    /// Insert or overwrite a key-value pair, marking it most recently used
    ///
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry first.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(handle) = self.index.lookup(&key) {
            self.store.set_value(handle, value);
            self.list.move_to_front(&mut self.store, handle);
            self.stats.record_update();
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict();
        }

        let handle = self.store.allocate(key.clone(), value);
        self.list.push_front(&mut self.store, handle);
        self.index.insert(key, handle);
        self.stats.record_insert();
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        self.list.remove(&mut self.store, handle);
        let (_, value) = self.store.free(handle);
        self.stats.record_removal();
        Some(value)
    }

    /// Remove and return the least recently used entry
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let handle = self.list.peek_tail(&self.store)?;
        let entry = self.unlink_entry(handle);
        self.stats.record_removal();
        Some(entry)
    }

    /// Least recently used entry, without changing its recency
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let handle = self.list.peek_tail(&self.store)?;
        Some(self.store.get(handle))
    }

    /// Most recently used entry, without changing its recency
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let handle = self.list.peek_head(&self.store)?;
        Some(self.store.get(handle))
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.list
            .iter(&self.store)
            .map(move |handle| self.store.get(handle))
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry (statistics are kept)
    pub fn clear(&mut self) {
        debug!(entries = self.len(), "clearing LRU cache");
        self.index.clear();
        self.list.clear(&mut self.store);
        self.store.clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset cache statistics
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Check every structural invariant, panicking on the first violation
    ///
    /// Walks the whole cache, so this is O(n).
    pub fn debug_validate(&self) {
        let len = self.list.len();
        assert_eq!(self.index.len(), len, "index and recency list disagree");
        assert_eq!(self.store.len(), len, "store and recency list disagree");
        assert!(len <= self.capacity, "{} entries exceed capacity {}", len, self.capacity);

        self.list.validate(&self.store);
        for handle in self.list.iter(&self.store) {
            let key = self.store.key(handle);
            assert_eq!(
                self.index.lookup(key),
                Some(handle),
                "index entry for slot {} is stale",
                handle.index()
            );
        }
    }

    fn touch<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.lookup(key) {
            Some(handle) => {
                self.list.move_to_front(&mut self.store, handle);
                self.stats.record_hit();
                Some(handle)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn evict(&mut self) {
        if let Some(handle) = self.list.peek_tail(&self.store) {
            trace!(slot = handle.index(), "evicting least recently used entry");
            self.unlink_entry(handle);
            self.stats.record_eviction();
        }
    }

    fn unlink_entry(&mut self, handle: Handle) -> (K, V) {
        let removed = self.index.remove(self.store.key(handle));
        debug_assert_eq!(removed, Some(handle), "index disagrees with recency list");
        self.list.remove(&mut self.store, handle);
        self.store.free(handle)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
