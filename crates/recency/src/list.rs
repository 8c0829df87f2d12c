//! Intrusive recency list
//!
//! The links live in the [`EntryStore`] slots; this type only tracks the
//! length. Both ends are anchored by sentinel slots, so every live entry has
//! a real neighbor on each side and no link update needs a branch.
//!
//! ```text
//! HEAD <-> most recent <-> ... <-> least recent <-> TAIL
//! ```

use crate::store::{EntryStore, Handle, HEAD, TAIL};

/// Most-recent-first ordering over store handles
#[derive(Debug, Default)]
pub(crate) struct RecencyList {
    len: usize,
}

impl RecencyList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a detached entry as the most recently used
    pub(crate) fn push_front<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        let index = handle.index();
        debug_assert!(store.is_live(handle), "push_front of dead handle");
        debug_assert!(store.is_detached(index), "slot {} is already linked", index);

        Self::attach_front(store, index);
        self.len += 1;
    }

    /// Relink an entry as the most recently used
    pub(crate) fn move_to_front<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        let index = handle.index();
        debug_assert!(store.is_live(handle), "move_to_front of dead handle");

        Self::unlink(store, index);
        Self::attach_front(store, index);
    }

    /// Unlink an entry from wherever it sits
    pub(crate) fn remove<K, V>(&mut self, store: &mut EntryStore<K, V>, handle: Handle) {
        let index = handle.index();
        debug_assert!(store.is_live(handle), "remove of dead handle");
        debug_assert!(!store.is_detached(index), "slot {} is not linked", index);

        Self::unlink(store, index);
        store.detach(index);
        self.len -= 1;
    }

    /// Least recently used entry
    pub(crate) fn peek_tail<K, V>(&self, store: &EntryStore<K, V>) -> Option<Handle> {
        match store.newer(TAIL) {
            HEAD => None,
            index => Some(store.handle_at(index)),
        }
    }

    /// Most recently used entry
    pub(crate) fn peek_head<K, V>(&self, store: &EntryStore<K, V>) -> Option<Handle> {
        match store.older(HEAD) {
            TAIL => None,
            index => Some(store.handle_at(index)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Forget every entry; the caller frees the slots
    pub(crate) fn clear<K, V>(&mut self, store: &mut EntryStore<K, V>) {
        store.link(HEAD, TAIL);
        self.len = 0;
    }

    /// Walk from most to least recently used
    pub(crate) fn iter<'a, K, V>(&self, store: &'a EntryStore<K, V>) -> Iter<'a, K, V> {
        Iter {
            store,
            next: store.older(HEAD),
            remaining: self.len,
        }
    }

    /// Check link symmetry and the length counter, panicking on corruption
    pub(crate) fn validate<K, V>(&self, store: &EntryStore<K, V>) {
        let mut count = 0;
        let mut newer = HEAD;
        let mut current = store.older(HEAD);

        while current != TAIL {
            assert!(count < self.len, "recency list is longer than {}", self.len);
            assert_ne!(current, HEAD, "recency list loops back to the head");
            assert_eq!(
                store.newer(current),
                newer,
                "slot {} has an asymmetric newer link",
                current
            );
            assert!(store.is_live(store.handle_at(current)));

            count += 1;
            newer = current;
            current = store.older(current);
        }

        assert_eq!(store.newer(TAIL), newer, "tail anchor is out of sync");
        assert_eq!(count, self.len, "recency list length counter is stale");
    }

    fn attach_front<K, V>(store: &mut EntryStore<K, V>, index: u32) {
        let first = store.older(HEAD);
        store.link(index, first);
        store.link(HEAD, index);
    }

    fn unlink<K, V>(store: &mut EntryStore<K, V>, index: u32) {
        let newer = store.newer(index);
        let older = store.older(index);
        store.link(newer, older);
    }
}

/// Iterator over handles, most recently used first
pub(crate) struct Iter<'a, K, V> {
    store: &'a EntryStore<K, V>,
    next: u32,
    remaining: usize,
}

impl<K, V> Iterator for Iter<'_, K, V> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        if self.next == TAIL {
            return None;
        }
        let handle = self.store.handle_at(self.next);
        self.next = self.store.older(self.next);
        self.remaining -= 1;
        Some(handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
