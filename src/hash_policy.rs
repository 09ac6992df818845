//! Hash policies: how a key becomes a home position and how two keys compare.
//!
//! A policy is a plain value carried by the set, so it can be swapped per
//! instance. Every policy here is deterministic: no random seeding, so the
//! same keys inserted in the same order land in the same buckets on every
//! run.
//!
//! `KeyTraits` picks the default: integral keys use [`IntMix`], everything
//! else uses [`StructuralHash`] over the key's `Hash` impl.

use core::hash::{BuildHasher, Hash};
use rustc_hash::FxBuildHasher;
use std::rc::Rc;
use std::sync::Arc;

/// Hash and equality used by the probing engine.
///
/// Both methods must be pure: equal keys hash equally, and repeated calls
/// with the same input return the same result.
pub trait HashPolicy<K: ?Sized> {
    fn hash(&self, key: &K) -> u64;
    fn equal(&self, a: &K, b: &K) -> bool;
}

/// Avalanche mixer for integral keys (the MurmurHash3 64-bit finalizer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntMix;

const MIX_SHIFT: u32 = 33;
const MIX_MUL_1: u64 = 0xff51_afd7_ed55_8ccd;
const MIX_MUL_2: u64 = 0xc4ce_b9fe_1a85_ec53;

impl IntMix {
    #[inline]
    pub const fn mix(mut x: u64) -> u64 {
        x ^= x >> MIX_SHIFT;
        x = x.wrapping_mul(MIX_MUL_1);
        x ^= x >> MIX_SHIFT;
        x = x.wrapping_mul(MIX_MUL_2);
        x ^= x >> MIX_SHIFT;
        x
    }
}

mod private {
    pub trait Sealed {}
}

/// Primitive integer-like keys that `IntMix` can widen to 64 bits.
pub trait Integral: private::Sealed + Copy + Eq {
    fn to_bits(self) -> u64;
}

macro_rules! integral {
    ($($t:ty),* $(,)?) => {$(
        impl private::Sealed for $t {}
        impl Integral for $t {
            #[inline]
            fn to_bits(self) -> u64 {
                // Signed types sign-extend.
                self as u64
            }
        }
    )*};
}

integral!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl private::Sealed for u128 {}
impl Integral for u128 {
    #[inline]
    fn to_bits(self) -> u64 {
        (self as u64) ^ ((self >> 64) as u64)
    }
}

impl private::Sealed for i128 {}
impl Integral for i128 {
    #[inline]
    fn to_bits(self) -> u64 {
        (self as u128).to_bits()
    }
}

impl private::Sealed for bool {}
impl Integral for bool {
    #[inline]
    fn to_bits(self) -> u64 {
        self as u64
    }
}

impl private::Sealed for char {}
impl Integral for char {
    #[inline]
    fn to_bits(self) -> u64 {
        self as u64
    }
}

impl<K: Integral> HashPolicy<K> for IntMix {
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        IntMix::mix(key.to_bits())
    }

    #[inline]
    fn equal(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Structural hashing through the key's `Hash` impl and a fixed-seed
/// `BuildHasher`.
///
/// The default builder is `FxBuildHasher`, which carries no per-process
/// seed. Plugging in a randomly seeded builder (such as std's
/// `RandomState`) works, but gives up reproducible placements.
#[derive(Debug, Clone, Default)]
pub struct StructuralHash<S = FxBuildHasher> {
    build: S,
}

impl StructuralHash {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> StructuralHash<S> {
    pub fn with_hasher(build: S) -> Self {
        Self { build }
    }

    pub fn hasher(&self) -> &S {
        &self.build
    }
}

impl<K, S> HashPolicy<K> for StructuralHash<S>
where
    K: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.build.hash_one(key)
    }

    #[inline]
    fn equal(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Default policy selection per key type.
///
/// Implemented for the integral primitives (`IntMix`) and for common
/// structural keys (`StructuralHash`): strings, slices, vectors, arrays,
/// options and small tuples. There is no blanket impl over `Hash`, so a key
/// type of your own does not get a default policy by deriving `Hash`. Give
/// it one with a single impl, or pass a policy explicitly through
/// `with_policy`/`with_capacity_and_policy`.
///
/// ```
/// use robinhood_set::{DynamicSet, KeyTraits, StructuralHash};
///
/// #[derive(Debug, Default, PartialEq, Eq, Hash)]
/// struct SensorId {
///     rack: u16,
///     slot: u16,
/// }
///
/// impl KeyTraits for SensorId {
///     type Policy = StructuralHash;
/// }
///
/// let mut seen: DynamicSet<SensorId> = DynamicSet::with_capacity(16);
/// assert!(seen.insert(SensorId { rack: 1, slot: 4 }));
/// assert!(seen.contains(&SensorId { rack: 1, slot: 4 }));
/// ```
pub trait KeyTraits {
    type Policy: HashPolicy<Self> + Default + Clone;
}

/// The policy `KeyTraits` selects for `K`.
pub type DefaultPolicy<K> = <K as KeyTraits>::Policy;

macro_rules! integral_keys {
    ($($t:ty),* $(,)?) => {$(
        impl KeyTraits for $t {
            type Policy = IntMix;
        }
    )*};
}

integral_keys!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char);

impl KeyTraits for String {
    type Policy = StructuralHash;
}

impl KeyTraits for &str {
    type Policy = StructuralHash;
}

impl KeyTraits for Box<str> {
    type Policy = StructuralHash;
}

impl KeyTraits for Rc<str> {
    type Policy = StructuralHash;
}

impl KeyTraits for Arc<str> {
    type Policy = StructuralHash;
}

impl<T: Hash + Eq> KeyTraits for &[T] {
    type Policy = StructuralHash;
}

impl<T: Hash + Eq> KeyTraits for Box<[T]> {
    type Policy = StructuralHash;
}

impl KeyTraits for () {
    type Policy = StructuralHash;
}

impl<T: Hash + Eq> KeyTraits for Vec<T> {
    type Policy = StructuralHash;
}

impl<T: Hash + Eq> KeyTraits for Option<T> {
    type Policy = StructuralHash;
}

impl<T: Hash + Eq, const N: usize> KeyTraits for [T; N] {
    type Policy = StructuralHash;
}

macro_rules! tuple_keys {
    ($(($($name:ident),+)),* $(,)?) => {$(
        impl<$($name: Hash + Eq),+> KeyTraits for ($($name,)+) {
            type Policy = StructuralHash;
        }
    )*};
}

tuple_keys!((A), (A, B), (A, B, C), (A, B, C, D));
