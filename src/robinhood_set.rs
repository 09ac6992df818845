//! RobinHoodSet: fixed-capacity open-addressing set with Robin-Hood probing
//! and backward-shift deletion.
//!
//! Every occupied slot at position `p` holding key `k` satisfies
//! `psl == (p - home(k)) mod capacity`, with `home(k) = hash(k) mod capacity`.
//! Insertion keeps that invariant by letting a probing key take the slot of
//! any resident that sits closer to its own home; deletion keeps it by
//! pulling the following run one slot back instead of leaving a tombstone.
//! Together they guarantee that along any probe run the stored `psl` never
//! drops below the number of steps a lookup has already taken while the key
//! it searches for is still ahead, which is what lets `find` stop early.

use crate::entry::Entry;
use crate::error::{CapacityError, InsertError};
use crate::hash_policy::{DefaultPolicy, HashPolicy};
use crate::storage::{HeapStorage, InlineStorage, Storage};
use core::fmt;
use core::marker::PhantomData;
use log::{debug, trace};

/// Slot index returned by `find`/`try_insert`. Resolve it with
/// [`RobinHoodSet::get`] or [`RobinHoodSet::entry`].
///
/// A position is only meaningful until the next mutating call on the set
/// that produced it: inserts, erases and `clear` move keys between slots.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position(usize);

impl Position {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Set with compile-time capacity `N`, stored in place.
pub type FixedSet<K, const N: usize> = RobinHoodSet<K, InlineStorage<K, N>, DefaultPolicy<K>>;

/// Set with a capacity chosen at runtime and allocated once.
pub type DynamicSet<K> = RobinHoodSet<K, HeapStorage<K>, DefaultPolicy<K>>;

#[derive(Clone)]
pub struct RobinHoodSet<K, S, H> {
    storage: S,
    len: usize,
    policy: H,
    _key: PhantomData<fn() -> K>,
}

#[inline]
fn next_slot(pos: usize, capacity: usize) -> usize {
    let next = pos + 1;
    if next == capacity {
        0
    } else {
        next
    }
}

impl<K, const N: usize, H> RobinHoodSet<K, InlineStorage<K, N>, H>
where
    K: Default,
    H: HashPolicy<K>,
{
    pub fn new() -> Self
    where
        H: Default,
    {
        Self::with_policy(H::default())
    }

    pub fn with_policy(policy: H) -> Self {
        Self::from_storage(InlineStorage::new(), policy)
    }
}

impl<K, const N: usize, H> Default for RobinHoodSet<K, InlineStorage<K, N>, H>
where
    K: Default,
    H: HashPolicy<K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, H> RobinHoodSet<K, HeapStorage<K>, H>
where
    K: Default,
    H: HashPolicy<K>,
{
    /// Panics if `capacity > MAX_CAPACITY`.
    pub fn with_capacity(capacity: usize) -> Self
    where
        H: Default,
    {
        Self::with_capacity_and_policy(capacity, H::default())
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, CapacityError>
    where
        H: Default,
    {
        Self::try_with_capacity_and_policy(capacity, H::default())
    }

    /// Panics if `capacity > MAX_CAPACITY`.
    pub fn with_capacity_and_policy(capacity: usize, policy: H) -> Self {
        Self::from_storage(HeapStorage::new(capacity), policy)
    }

    pub fn try_with_capacity_and_policy(capacity: usize, policy: H) -> Result<Self, CapacityError> {
        Ok(Self::from_storage(HeapStorage::try_new(capacity)?, policy))
    }
}

impl<K, S, H> RobinHoodSet<K, S, H>
where
    S: Storage<K>,
{
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// The active hash policy.
    #[inline]
    pub fn hash_function(&self) -> &H {
        &self.policy
    }

    /// Raw bucket array, for diagnostics.
    #[inline]
    pub fn slots(&self) -> &[Entry<K>] {
        self.storage.slots()
    }

    /// The slot at `pos`, or `None` if `pos` is out of range.
    #[inline]
    pub fn entry(&self, pos: Position) -> Option<&Entry<K>> {
        self.storage.slots().get(pos.0)
    }

    /// The key at `pos`, or `None` if the slot is out of range or empty.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<&K> {
        self.entry(pos).and_then(Entry::key)
    }

    /// Occupied slots in bucket order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            it: self.storage.slots().iter().enumerate(),
            remaining: self.len,
        }
    }
}

impl<K, S, H> RobinHoodSet<K, S, H>
where
    K: Default,
    S: Storage<K>,
    H: HashPolicy<K>,
{
    /// Build a set over `storage`. Any content already in the storage is
    /// discarded.
    pub fn from_storage(mut storage: S, policy: H) -> Self {
        storage.reset();
        debug!("robinhood set created with capacity {}", storage.capacity());
        Self {
            storage,
            len: 0,
            policy,
            _key: PhantomData,
        }
    }

    // Callers must rule out capacity 0.
    #[inline]
    fn home(&self, key: &K) -> usize {
        (self.policy.hash(key) % self.capacity() as u64) as usize
    }

    /// Insert `key`. Returns `false` if the set is full or the key is
    /// already present; a full set reports `false` without checking for the
    /// key.
    #[inline]
    pub fn insert(&mut self, key: K) -> bool {
        self.try_insert(key).is_ok()
    }

    /// Insert `key`, returning the slot it was placed in.
    ///
    /// Fails with `Full` whenever the set is at capacity, even if `key` is
    /// also present. On failure nothing is mutated.
    pub fn try_insert(&mut self, key: K) -> Result<Position, InsertError> {
        if self.is_full() {
            return Err(InsertError::Full);
        }
        let capacity = self.capacity();
        let mut pos = self.home(&key);
        let mut candidate = Entry::occupied(key);
        // Where the caller's key ended up, once it has been swapped into a
        // slot and some displaced resident keeps probing in its place.
        let mut placed = None;

        let slots = self.storage.slots_mut();
        let policy = &self.policy;
        loop {
            let slot = &mut slots[pos];
            if slot.is_empty() {
                *slot = candidate;
                self.len += 1;
                return Ok(Position(placed.unwrap_or(pos)));
            }
            // Only reachable before the first swap: the key is present at
            // the end of a run whose residents all have psl >= candidate.psl.
            if policy.equal(&slot.key, &candidate.key) {
                return Err(InsertError::DuplicateKey);
            }
            if slot.psl < candidate.psl {
                trace!(
                    "insert: bucket {pos} resident (psl {}) displaced by psl {}",
                    slot.psl,
                    candidate.psl
                );
                core::mem::swap(slot, &mut candidate);
                placed.get_or_insert(pos);
            }
            candidate.psl += 1;
            pos = next_slot(pos, capacity);
        }
    }

    /// Locate `key`. Stops at the first empty slot or the first resident
    /// that is closer to its home than the search is to the key's home.
    pub fn find(&self, key: &K) -> Option<Position> {
        let capacity = self.capacity();
        if capacity == 0 {
            return None;
        }
        let slots = self.storage.slots();
        let mut pos = self.home(key);
        for search_psl in 0..capacity {
            let slot = &slots[pos];
            if slot.is_empty() || (slot.psl as usize) < search_psl {
                return None;
            }
            if self.policy.equal(&slot.key, key) {
                return Some(Position(pos));
            }
            pos = next_slot(pos, capacity);
        }
        None
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Probe steps `find` takes to reach `key`, i.e. its stored psl.
    pub fn probe_len(&self, key: &K) -> Option<u32> {
        self.find(key).map(|p| self.storage.slots()[p.0].psl)
    }

    /// Remove `key`. Returns `false` if it was not present.
    #[inline]
    pub fn erase(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Remove `key` and hand back the stored copy.
    ///
    /// The run after the removed slot is shifted back by one until an empty
    /// slot, a key already at its home, or a full wrap of the ring.
    pub fn take(&mut self, key: &K) -> Option<K> {
        let Position(erased) = self.find(key)?;
        let capacity = self.capacity();
        let slots = self.storage.slots_mut();

        let mut curr = erased;
        let mut next = next_slot(curr, capacity);
        while next != erased && slots[next].occupied && slots[next].psl > 0 {
            // The removed record rides forward into the vacated slot.
            slots.swap(curr, next);
            slots[curr].psl -= 1;
            trace!(
                "erase: shifted bucket {next} back to {curr} (psl now {})",
                slots[curr].psl
            );
            curr = next;
            next = next_slot(next, capacity);
        }
        self.len -= 1;
        Some(slots[curr].reset())
    }

    /// Empty the set. Capacity and storage are kept.
    pub fn clear(&mut self) {
        trace!("clear: dropping {} keys", self.len);
        self.len = 0;
        self.storage.reset();
    }
}

/// Iterator over occupied slots in bucket order.
pub struct Iter<'a, K> {
    it: core::iter::Enumerate<core::slice::Iter<'a, Entry<K>>>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (Position, &'a K);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (i, e) = self.it.find(|(_, e)| e.occupied)?;
        self.remaining -= 1;
        Some((Position(i), &e.key))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> core::iter::FusedIterator for Iter<'_, K> {}

impl<'a, K, S, H> IntoIterator for &'a RobinHoodSet<K, S, H>
where
    S: Storage<K>,
{
    type Item = (Position, &'a K);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, S, H> Extend<K> for RobinHoodSet<K, S, H>
where
    K: Default,
    S: Storage<K>,
    H: HashPolicy<K>,
{
    /// Keys that do not fit or are already present are dropped.
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            let _ = self.insert(k);
        }
    }
}

impl<K, S, H> fmt::Debug for RobinHoodSet<K, S, H>
where
    K: fmt::Debug,
    S: Storage<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|(_, k)| k)).finish()
    }
}
