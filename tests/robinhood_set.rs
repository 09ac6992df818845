use robinhood_set::{
    DynamicSet, FixedSet, HashPolicy, HeapStorage, InlineStorage, InsertError, IntMix, Position,
    RobinHoodSet, Storage, StructuralHash,
};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Home position of key `k` is `k mod capacity`.
#[derive(Clone, Copy, Default, Debug)]
struct Identity;
impl HashPolicy<u32> for Identity {
    fn hash(&self, key: &u32) -> u64 {
        *key as u64
    }
    fn equal(&self, a: &u32, b: &u32) -> bool {
        a == b
    }
}

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s >> 16)
    })
}

fn slot<K: Copy, S: Storage<K>, H>(set: &RobinHoodSet<K, S, H>, i: usize) -> Option<(K, u32)> {
    let e = set.slots().get(i)?;
    e.key().map(|k| (*k, e.psl()))
}

#[test]
fn three_keys_share_home_then_set_fills() {
    let mut s: RobinHoodSet<u32, InlineStorage<u32, 4>, Identity> = RobinHoodSet::new();
    for k in [0, 4, 8] {
        assert!(s.insert(k));
    }
    assert_eq!(slot(&s, 0), Some((0, 0)));
    assert_eq!(slot(&s, 1), Some((4, 1)));
    assert_eq!(slot(&s, 2), Some((8, 2)));
    assert_eq!(slot(&s, 3), None);
    for k in [0, 4, 8] {
        assert!(s.find(&k).is_some());
    }

    // Home 1.
    assert!(s.insert(5));
    assert!(s.is_full());
    assert_eq!(s.len(), s.capacity());
    for k in [0, 4, 8, 5] {
        assert!(s.contains(&k));
    }
    assert!(!s.insert(9));
    assert_eq!(s.len(), 4);
}

#[test]
fn erase_pulls_follower_onto_home() {
    let mut s: RobinHoodSet<u32, HeapStorage<u32>, Identity> = RobinHoodSet::with_capacity(2);
    assert!(s.insert(0));
    assert!(s.insert(2));
    assert_eq!(slot(&s, 1), Some((2, 1)));
    assert!(s.contains(&0) && s.contains(&2));

    assert!(s.erase(&0));
    assert_eq!(slot(&s, 0), Some((2, 0)));
    assert_eq!(slot(&s, 1), None);
    assert_eq!(s.find(&2).map(Position::index), Some(0));
    assert_eq!(s.probe_len(&2), Some(0));
}

#[test]
fn insert_twice_is_true_then_false() {
    let mut s: DynamicSet<String> = DynamicSet::with_capacity(4);
    assert!(s.insert("k".to_string()));
    assert!(!s.insert("k".to_string()));
    assert_eq!(s.try_insert("k".to_string()), Err(InsertError::DuplicateKey));
    assert_eq!(s.len(), 1);
}

#[test]
fn full_set_rejects_duplicate_as_full() {
    let mut s: FixedSet<i16, 3> = FixedSet::new();
    s.extend([-1, 0, 1]);
    assert!(s.is_full());
    assert_eq!(s.try_insert(0), Err(InsertError::Full));
    assert_eq!(s.try_insert(7), Err(InsertError::Full));
    assert_eq!(s.len(), 3);
    assert!(s.erase(&0));
    assert!(s.insert(7));
}

#[test]
fn hash_function_reports_policy() {
    let s: FixedSet<u64, 8> = FixedSet::default();
    let _: &IntMix = s.hash_function();
    let t: DynamicSet<&str> = DynamicSet::with_capacity(8);
    let _: &StructuralHash = t.hash_function();
    assert_eq!(s.hash_function().hash(&1u64), IntMix::mix(1));
}

#[test]
fn debug_lists_keys() {
    let mut s: RobinHoodSet<u32, InlineStorage<u32, 4>, Identity> = RobinHoodSet::new();
    s.extend([2, 1]);
    assert_eq!(format!("{s:?}"), "{1, 2}");
}

// Fill half, fill to capacity, erase half, then clear; checks membership
// against a std HashSet throughout.
fn fill_erase_clear<K, S, H>(mut set: RobinHoodSet<K, S, H>, make_key: impl Fn(u64) -> K)
where
    K: Default + Copy + Eq + Hash + Debug,
    S: Storage<K>,
    H: HashPolicy<K>,
{
    let capacity = set.capacity();
    let half = capacity / 2;
    let mut keys = lcg(0).map(&make_key);
    let mut present: Vec<K> = Vec::with_capacity(capacity);
    let mut seen: HashSet<K> = HashSet::new();

    while present.len() != half {
        let k = keys.next().unwrap();
        if seen.insert(k) {
            assert!(set.insert(k), "insert {k:?}");
            present.push(k);
        }
    }
    for k in &present {
        assert!(set.contains(k));
    }

    while present.len() != capacity {
        let k = keys.next().unwrap();
        if seen.insert(k) {
            assert!(set.insert(k), "insert {k:?}");
            present.push(k);
        }
    }
    for k in &present {
        assert!(set.contains(k), "missing {k:?}");
    }
    assert_eq!(set.len(), capacity);
    assert!(set.is_full());

    let removed: Vec<K> = present.drain(..half).collect();
    for k in &removed {
        assert!(set.erase(k), "erase {k:?}");
        assert!(set.find(k).is_none(), "still found {k:?}");
    }
    for k in &removed {
        assert!(!set.contains(k));
        assert!(!set.erase(k));
    }
    for k in &present {
        let p = set.find(k).expect("remaining key");
        assert_eq!(set.get(p), Some(k));
    }
    assert_eq!(set.len(), capacity - half);
    // Capacity 1 has nothing to erase in the first half.
    assert_eq!(set.is_full(), half == 0);

    set.clear();
    assert_eq!(set.len(), 0);
    assert_eq!(set.capacity(), capacity);
    assert!(set.slots().iter().all(|e| e.is_empty() && e.psl() == 0));
    for k in &present {
        assert!(!set.contains(k));
    }
}

#[test]
fn fill_erase_clear_u32() {
    fill_erase_clear(DynamicSet::<u32>::with_capacity(10384), |x| x as u32);
    fill_erase_clear(FixedSet::<u32, 10384>::new(), |x| x as u32);
}

#[test]
fn fill_erase_clear_i32() {
    fill_erase_clear(DynamicSet::<i32>::with_capacity(10384), |x| x as i32);
    fill_erase_clear(FixedSet::<i32, 10384>::new(), |x| x as i32);
}

#[test]
fn fill_erase_clear_u64() {
    fill_erase_clear(DynamicSet::<u64>::with_capacity(5192), |x| x);
    fill_erase_clear(FixedSet::<u64, 5192>::new(), |x| x);
}

#[test]
fn fill_erase_clear_i64() {
    fill_erase_clear(DynamicSet::<i64>::with_capacity(5192), |x| x as i64);
    fill_erase_clear(FixedSet::<i64, 5192>::new(), |x| x as i64);
}

#[test]
fn fill_erase_clear_odd_capacities() {
    for cap in [2, 3, 7, 61] {
        fill_erase_clear(DynamicSet::<u16>::with_capacity(cap), |x| x as u16);
    }
    fill_erase_clear(FixedSet::<char, 33>::new(), |x| {
        char::from_u32((x % 0xD000) as u32).unwrap_or('?')
    });
}

/// Invariant: a single-slot set is full after one insert and empty again
/// after erasing it; every key shares the one home.
#[test]
fn single_slot_set() {
    fill_erase_clear(DynamicSet::<u16>::with_capacity(1), |x| x as u16);

    let mut s: RobinHoodSet<u32, InlineStorage<u32, 1>, Identity> = RobinHoodSet::new();
    assert!(s.insert(9));
    assert!(s.is_full());
    assert_eq!(slot(&s, 0), Some((9, 0)));
    assert_eq!(s.try_insert(9), Err(InsertError::Full));
    assert_eq!(s.try_insert(4), Err(InsertError::Full));
    assert_eq!(s.find(&4), None);
    assert!(s.erase(&9));
    assert!(s.is_empty() && !s.is_full());
    assert_eq!(slot(&s, 0), None);
    assert!(s.insert(4));
    assert_eq!(s.find(&4).map(Position::index), Some(0));
}
