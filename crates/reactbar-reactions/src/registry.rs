//! Persistent value-keyed handle storage.
//!
//! The renderer's button and mask handles outlive a single layout pass. A
//! [`ButtonRegistry`] maps each reaction value to its handle and remembers
//! insertion order so that removals are reported deterministically.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
struct Slot<H> {
    handle: H,
    seq: u64,
}

/// Map from reaction value to a renderer handle.
///
/// Values are unique; inserting an existing value replaces its handle and
/// moves it to the end of the insertion order.
#[derive(Debug, Clone)]
pub struct ButtonRegistry<H> {
    slots: FxHashMap<String, Slot<H>>,
    next_seq: u64,
}

impl<H> Default for ButtonRegistry<H> {
    fn default() -> Self {
        Self {
            slots: FxHashMap::default(),
            next_seq: 0,
        }
    }
}

impl<H> ButtonRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the handle for `value`, returning the old one.
    pub fn insert(&mut self, value: impl Into<String>, handle: H) -> Option<H> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots
            .insert(value.into(), Slot { handle, seq })
            .map(|old| old.handle)
    }

    pub fn remove(&mut self, value: &str) -> Option<H> {
        self.slots.remove(value).map(|slot| slot.handle)
    }

    pub fn get(&self, value: &str) -> Option<&H> {
        self.slots.get(value).map(|slot| &slot.handle)
    }

    pub fn get_mut(&mut self, value: &str) -> Option<&mut H> {
        self.slots.get_mut(value).map(|slot| &mut slot.handle)
    }

    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.slots.contains_key(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Values in insertion order.
    pub fn values(&self) -> Vec<&str> {
        self.ordered().into_iter().map(|(value, _)| value).collect()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.ordered().into_iter()
    }

    /// Mutable entries in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut H)> {
        let mut slots: Vec<_> = self.slots.iter_mut().collect();
        slots.sort_by_key(|(_, slot)| slot.seq);
        slots
            .into_iter()
            .map(|(value, slot)| (value.as_str(), &mut slot.handle))
    }

    /// Remove every entry, in insertion order.
    pub fn drain(&mut self) -> Vec<(String, H)> {
        let mut slots: Vec<_> = self.slots.drain().collect();
        slots.sort_by_key(|(_, slot)| slot.seq);
        slots
            .into_iter()
            .map(|(value, slot)| (value, slot.handle))
            .collect()
    }

    fn ordered(&self) -> Vec<(&str, &H)> {
        let mut slots: Vec<_> = self.slots.iter().collect();
        slots.sort_by_key(|(_, slot)| slot.seq);
        slots
            .into_iter()
            .map(|(value, slot)| (value.as_str(), &slot.handle))
            .collect()
    }
}
