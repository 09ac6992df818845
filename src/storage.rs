//! Backing stores: a fixed-length run of slots allocated exactly once.
//!
//! Both strategies expose the same contract and are picked by type, so the
//! engine never branches on which one it holds.

use crate::entry::Entry;
use crate::error::CapacityError;

/// Largest capacity a store may have; probe lengths are kept in a `u32`.
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Fixed-capacity slot storage.
///
/// Implementations never grow or shrink: `capacity()` is constant for the
/// lifetime of the value and `slots()` always has exactly that many
/// elements.
pub trait Storage<K> {
    fn slots(&self) -> &[Entry<K>];
    fn slots_mut(&mut self) -> &mut [Entry<K>];

    #[inline]
    fn capacity(&self) -> usize {
        self.slots().len()
    }

    /// Empty every slot in place. Capacity and allocation are kept.
    fn reset(&mut self)
    where
        K: Default,
    {
        for e in self.slots_mut() {
            e.reset();
        }
    }
}

/// In-place storage sized by a compile-time constant. Never allocates.
#[derive(Debug, Clone)]
pub struct InlineStorage<K, const N: usize> {
    slots: [Entry<K>; N],
}

impl<K, const N: usize> InlineStorage<K, N> {
    const FITS: () = assert!(N <= MAX_CAPACITY, "inline capacity exceeds MAX_CAPACITY");
}

impl<K: Default, const N: usize> InlineStorage<K, N> {
    pub fn new() -> Self {
        let () = Self::FITS;
        Self {
            slots: core::array::from_fn(|_| Entry::default()),
        }
    }
}

impl<K: Default, const N: usize> Default for InlineStorage<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, const N: usize> Storage<K> for InlineStorage<K, N> {
    #[inline]
    fn slots(&self) -> &[Entry<K>] {
        &self.slots
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [Entry<K>] {
        &mut self.slots
    }

    #[inline]
    fn capacity(&self) -> usize {
        N
    }
}

/// One heap allocation sized at construction from a runtime capacity.
#[derive(Debug, Clone)]
pub struct HeapStorage<K> {
    slots: Box<[Entry<K>]>,
}

impl<K: Default> HeapStorage<K> {
    /// Allocate `capacity` empty slots.
    ///
    /// Panics if `capacity > MAX_CAPACITY`; see [`HeapStorage::try_new`].
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(s) => s,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        if capacity > MAX_CAPACITY {
            return Err(CapacityError::TooLarge {
                requested: capacity,
                max: MAX_CAPACITY,
            });
        }
        let slots = (0..capacity).map(|_| Entry::default()).collect();
        Ok(Self { slots })
    }
}

impl<K> Storage<K> for HeapStorage<K> {
    #[inline]
    fn slots(&self) -> &[Entry<K>] {
        &self.slots
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [Entry<K>] {
        &mut self.slots
    }
}
