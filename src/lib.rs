//! robinhood-set: a fixed-capacity membership set using open addressing
//! with Robin-Hood probing and backward-shift deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: bounded-cardinality membership tracking with no allocation
//!   after construction and no amortized-growth pauses.
//! - Layers:
//!   - HashPolicy<K>: maps a key to a deterministic `u64` digest and
//!     compares keys. Integral keys default to an avalanche mixer; other
//!     keys default to a fixed-seed structural hash.
//!   - Storage<K>: a fixed-length run of `Entry` slots, either in place
//!     (`InlineStorage<K, N>`) or in one heap allocation (`HeapStorage<K>`).
//!   - RobinHoodSet<K, S, H>: the probing engine; owns the storage, the
//!     policy and the element count.
//!
//! Constraints
//! - Capacity is fixed at construction. No resize, no rehash, and a load
//!   factor of 1.0 is allowed.
//! - Capacity 0 is legal; such a set is permanently full.
//! - No tombstones: an erased slot is emptied and the following run is
//!   shifted back toward its homes.
//! - Set operations never panic; failures are `false`/`None`. Only the
//!   panicking constructors (`with_capacity` above `MAX_CAPACITY`) do.
//!
//! Insert precedence
//! - `insert` checks for a full set before looking for the key, so a
//!   duplicate offered to a full set reports the same `false` as a new key.
//!   `try_insert` exposes the cause but keeps that order (`Full` wins).
//!
//! Position tokens
//! - `find` returns a `Position`, a plain slot index. It stays safe to use
//!   after mutation but may then name a different key or an empty slot, so
//!   do not hold one across `insert`/`erase`/`clear`.
//!
//! Threading
//! - One instance is driven by one thread at a time; `&mut self` on every
//!   mutating call enforces that. Independent instances may live on
//!   different threads (the set is `Send`/`Sync` when its parts are), which
//!   is the way to shard work.
//!
//! Notes and non-goals
//! - Iteration order is raw bucket order and carries no other meaning.
//! - Keys need `Default` so emptied slots can drop the key they held.

mod entry;
mod error;
pub mod hash_policy;
mod robinhood_set;
mod robinhood_set_proptest;
pub mod storage;

// Public surface
pub use entry::Entry;
pub use error::{CapacityError, InsertError};
pub use hash_policy::{DefaultPolicy, HashPolicy, IntMix, KeyTraits, StructuralHash};
pub use robinhood_set::{DynamicSet, FixedSet, Iter, Position, RobinHoodSet};
pub use storage::{HeapStorage, InlineStorage, Storage, MAX_CAPACITY};
