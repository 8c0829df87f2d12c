//! Key index: key -> store handle

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

use crate::store::Handle;

pub(crate) struct KeyIndex<K> {
    map: HashMap<K, Handle, RandomState>,
}

impl<K: Hash + Eq> KeyIndex<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub(crate) fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Index a key that is not present yet
    pub(crate) fn insert(&mut self, key: K, handle: Handle) {
        let previous = self.map.insert(key, handle);
        debug_assert!(previous.is_none(), "key was already indexed");
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EntryStore;

    #[test]
    fn test_index_insert_lookup_remove() {
        let mut store = EntryStore::with_capacity(2);
        let mut index = KeyIndex::with_capacity(2);

        let h = store.allocate("a".to_string(), 1);
        index.insert("a".to_string(), h);

        // Borrowed lookup
        assert_eq!(index.lookup("a"), Some(h));
        assert_eq!(index.lookup("b"), None);
        assert_eq!(index.len(), 1);

        assert_eq!(index.remove("a"), Some(h));
        assert_eq!(index.remove("a"), None);
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_index_clear() {
        let mut store = EntryStore::with_capacity(2);
        let mut index = KeyIndex::with_capacity(2);

        index.insert(1, store.allocate(1, ()));
        index.insert(2, store.allocate(2, ()));
        index.clear();

        assert_eq!(index.len(), 0);
        assert_eq!(index.lookup(&1), None);
    }
}
