//! Slot record stored in the backing array.

/// One bucket of the table.
///
/// `psl` is the probe-sequence length: how many slots past its home
/// position the key currently sits. It is only meaningful while
/// `occupied` is set; an empty slot holds `K::default()` and `psl == 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry<K> {
    pub(crate) key: K,
    pub(crate) occupied: bool,
    pub(crate) psl: u32,
}

impl<K> Entry<K> {
    #[inline]
    pub(crate) fn occupied(key: K) -> Self {
        Self {
            key,
            occupied: true,
            psl: 0,
        }
    }

    /// The stored key, or `None` for an empty slot.
    #[inline]
    pub fn key(&self) -> Option<&K> {
        self.occupied.then_some(&self.key)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.occupied
    }

    #[inline]
    pub fn psl(&self) -> u32 {
        self.psl
    }
}

impl<K: Default> Entry<K> {
    /// Empty the slot, dropping any key it held.
    #[inline]
    pub(crate) fn reset(&mut self) -> K {
        self.occupied = false;
        self.psl = 0;
        core::mem::take(&mut self.key)
    }
}
