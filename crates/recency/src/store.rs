//! Entry store: a slot arena owning every live entry
//!
//! Each slot carries the entry payload plus its two recency links, stored as
//! slot indices. Slots 0 and 1 are the head and tail anchors of the recency
//! list; they never hold a payload and never enter the free list.
//!
//! Freed slots bump their generation, so a [`Handle`] minted before the free
//! no longer matches the slot and is caught by the debug assertions.

use std::mem;

/// Slot index of the head anchor (newer than every entry)
pub(crate) const HEAD: u32 = 0;

/// Slot index of the tail anchor (older than every entry)
pub(crate) const TAIL: u32 = 1;

/// Number of slots reserved for the anchors
const RESERVED: usize = 2;

/// Slots preallocated up front, regardless of how large the capacity is
pub(crate) const PREALLOCATE_LIMIT: usize = 4096;

/// Largest number of entries a store can address
pub(crate) const MAX_ENTRIES: usize = u32::MAX as usize - RESERVED;

/// Stable reference to an occupied slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// Slot index this handle points at
    #[inline]
    pub(crate) fn index(self) -> u32 {
        self.index
    }
}

struct Slot<K, V> {
    generation: u32,
    /// Neighbor touched more recently (towards the head anchor)
    newer: u32,
    /// Neighbor touched less recently (towards the tail anchor)
    older: u32,
    entry: Option<(K, V)>,
}

impl<K, V> Slot<K, V> {
    fn vacant(index: u32) -> Self {
        Self {
            generation: 0,
            newer: index,
            older: index,
            entry: None,
        }
    }
}

/// Arena of entry slots with a free list for reuse
pub(crate) struct EntryStore<K, V> {
    slots: Vec<Slot<K, V>>,
    free_list: Vec<u32>,
    len: usize,
}

impl<K, V> EntryStore<K, V> {
    /// Create a store sized for `capacity` entries
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.min(PREALLOCATE_LIMIT) + RESERVED);
        slots.push(Slot::vacant(HEAD));
        slots.push(Slot::vacant(TAIL));

        let mut store = Self {
            slots,
            free_list: Vec::new(),
            len: 0,
        };
        store.link(HEAD, TAIL);
        store
    }

    /// Store a new entry, reusing a freed slot when one is available
    pub(crate) fn allocate(&mut self, key: K, value: V) -> Handle {
        let index = match self.free_list.pop() {
            Some(index) => index,
            None => {
                let index = match u32::try_from(self.slots.len()) {
                    Ok(index) if index != u32::MAX => index,
                    _ => panic!("entry store exhausted at {} slots", self.slots.len()),
                };
                self.slots.push(Slot::vacant(index));
                index
            }
        };

        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.entry.is_none(), "allocated slot {} is occupied", index);
        slot.entry = Some((key, value));
        slot.newer = index;
        slot.older = index;
        self.len += 1;

        Handle {
            index,
            generation: slot.generation,
        }
    }

    /// Release a slot, returning its payload
    ///
    /// The slot's generation advances so that `handle` goes stale.
    pub(crate) fn free(&mut self, handle: Handle) -> (K, V) {
        let index = handle.index;
        let slot = self.slot_mut(handle);
        let entry = match slot.entry.take() {
            Some(entry) => entry,
            None => vacant_slot(handle),
        };
        slot.generation = slot.generation.wrapping_add(1);
        slot.newer = index;
        slot.older = index;

        self.free_list.push(index);
        self.len -= 1;
        entry
    }

    /// Key and value behind a handle
    pub(crate) fn get(&self, handle: Handle) -> (&K, &V) {
        let (key, value) = self.entry(handle);
        (key, value)
    }

    pub(crate) fn key(&self, handle: Handle) -> &K {
        &self.entry(handle).0
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        match &mut self.slot_mut(handle).entry {
            Some((_, value)) => value,
            None => vacant_slot(handle),
        }
    }

    /// Overwrite the value in place, returning the previous one
    pub(crate) fn set_value(&mut self, handle: Handle, value: V) -> V {
        mem::replace(self.value_mut(handle), value)
    }

    /// Whether `handle` still refers to an occupied slot of the same generation
    pub(crate) fn is_live(&self, handle: Handle) -> bool {
        self.slots
            .get(handle.index as usize)
            .map(|slot| slot.generation == handle.generation && slot.entry.is_some())
            .unwrap_or(false)
    }

    /// Current handle for an occupied slot index
    pub(crate) fn handle_at(&self, index: u32) -> Handle {
        let slot = &self.slots[index as usize];
        debug_assert!(slot.entry.is_some(), "slot {} is not occupied", index);
        Handle {
            index,
            generation: slot.generation,
        }
    }

    /// Number of occupied slots
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Slots ever allocated, anchors included
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop every payload and return all slots to the free list
    pub(crate) fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().skip(RESERVED) {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.newer = index as u32;
            slot.older = index as u32;
        }
        // Pop order hands out low indices first
        self.free_list
            .extend((RESERVED as u32..self.slots.len() as u32).rev());
        self.len = 0;
        self.link(HEAD, TAIL);
    }

    #[inline]
    pub(crate) fn newer(&self, index: u32) -> u32 {
        self.slots[index as usize].newer
    }

    #[inline]
    pub(crate) fn older(&self, index: u32) -> u32 {
        self.slots[index as usize].older
    }

    /// Make `newer` and `older` adjacent, `newer` first
    #[inline]
    pub(crate) fn link(&mut self, newer: u32, older: u32) {
        self.slots[newer as usize].older = older;
        self.slots[older as usize].newer = newer;
    }

    /// Point a slot's links back at itself
    #[inline]
    pub(crate) fn detach(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        slot.newer = index;
        slot.older = index;
    }

    #[inline]
    pub(crate) fn is_detached(&self, index: u32) -> bool {
        let slot = &self.slots[index as usize];
        slot.newer == index && slot.older == index
    }

    fn entry(&self, handle: Handle) -> &(K, V) {
        match &self.slot(handle).entry {
            Some(entry) => entry,
            None => vacant_slot(handle),
        }
    }

    fn slot(&self, handle: Handle) -> &Slot<K, V> {
        let slot = &self.slots[handle.index as usize];
        debug_assert_eq!(
            slot.generation, handle.generation,
            "stale handle for slot {}",
            handle.index
        );
        slot
    }

    fn slot_mut(&mut self, handle: Handle) -> &mut Slot<K, V> {
        let slot = &mut self.slots[handle.index as usize];
        debug_assert_eq!(
            slot.generation, handle.generation,
            "stale handle for slot {}",
            handle.index
        );
        slot
    }
}

#[cold]
#[inline(never)]
fn vacant_slot(handle: Handle) -> ! {
    panic!("handle refers to vacant slot {}", handle.index)
}
