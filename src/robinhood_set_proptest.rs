#![cfg(test)]

// Property tests for RobinHoodSet kept inside the crate so they can read
// slot internals directly.

use crate::entry::Entry;
use crate::error::InsertError;
use crate::hash_policy::HashPolicy;
use crate::robinhood_set::{DynamicSet, Position, RobinHoodSet};
use crate::storage::{HeapStorage, InlineStorage, Storage};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

// Pool-indexed operations: indices shrink to earlier keys, and op lists
// shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Erase(usize),
    Find(usize),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<u32>, Vec<Op>)> {
    (
        0usize..=24,
        proptest::collection::hash_set(any::<u32>(), 1..=32),
    )
        .prop_flat_map(|(capacity, pool)| {
            let pool: Vec<u32> = pool.into_iter().collect();
            let idx = 0..pool.len();
            let op = prop_oneof![
                4 => idx.clone().prop_map(Op::Insert),
                3 => idx.clone().prop_map(Op::Erase),
                2 => idx.prop_map(Op::Find),
                1 => Just(Op::Clear),
                1 => Just(Op::Iterate),
            ];
            proptest::collection::vec(op, 1..120)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        })
}

/// Every occupied slot is `psl` steps past its home, and keys are unique.
fn check_layout<K, S, H>(set: &RobinHoodSet<K, S, H>) -> Result<(), TestCaseError>
where
    K: Default + Clone + Eq + std::hash::Hash + std::fmt::Debug,
    S: Storage<K>,
    H: HashPolicy<K>,
{
    let cap = set.capacity() as u64;
    let mut seen = HashSet::new();
    for (p, e) in set.slots().iter().enumerate() {
        if let Some(k) = e.key() {
            let home = set.hash_function().hash(k) % cap;
            prop_assert_eq!(e.psl() as u64, (p as u64 + cap - home) % cap);
            prop_assert!(seen.insert(k.clone()), "duplicate key {:?}", k);
        } else {
            prop_assert_eq!(e.psl(), 0);
        }
    }
    prop_assert_eq!(seen.len(), set.len());
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// - insert succeeds iff not full and not present; full wins over duplicate.
// - find/contains parity with the model; found positions hold the key.
// - erase succeeds iff present; probe lengths of survivors never grow.
// - len/is_full parity and the psl layout invariant after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let mut sut: DynamicSet<u32> = DynamicSet::with_capacity(capacity);
        let mut model: HashSet<u32> = HashSet::new();

        for op in ops {
            match op {
                Op::Insert(i) => {
                    let k = pool[i];
                    let full = model.len() == capacity;
                    let already = model.contains(&k);
                    match sut.try_insert(k) {
                        Ok(p) => {
                            prop_assert!(!full && !already);
                            prop_assert_eq!(sut.get(p), Some(&k));
                            model.insert(k);
                        }
                        Err(InsertError::Full) => prop_assert!(full),
                        Err(InsertError::DuplicateKey) => prop_assert!(!full && already),
                    }
                }
                Op::Erase(i) => {
                    let k = pool[i];
                    let before: Vec<(u32, u32)> = model
                        .iter()
                        .filter(|&&m| m != k)
                        .map(|&m| (m, sut.probe_len(&m).unwrap()))
                        .collect();
                    prop_assert_eq!(sut.erase(&k), model.remove(&k));
                    prop_assert!(sut.find(&k).is_none());
                    for (m, psl) in before {
                        let after = sut.probe_len(&m);
                        prop_assert!(after.is_some_and(|a| a <= psl), "key {} psl {:?} > {}", m, after, psl);
                    }
                }
                Op::Find(i) => {
                    let k = pool[i];
                    let found = sut.find(&k);
                    prop_assert_eq!(found.is_some(), model.contains(&k));
                    if let Some(p) = found {
                        prop_assert_eq!(sut.get(p), Some(&k));
                    }
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
                Op::Iterate => {
                    let keys: BTreeSet<u32> = sut.iter().map(|(_, k)| *k).collect();
                    let expected: BTreeSet<u32> = model.iter().copied().collect();
                    prop_assert_eq!(keys, expected);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_full(), model.len() == capacity);
            let findable = pool.iter().filter(|k| sut.contains(k)).count();
            prop_assert_eq!(findable, sut.len());
            if capacity > 0 {
                check_layout(&sut)?;
            }
        }
    }
}

// Policy that sends every key to bucket `key % 3`, so runs collide and
// wrap constantly.
#[derive(Clone, Copy, Default)]
struct Clustered;
impl HashPolicy<u32> for Clustered {
    fn hash(&self, key: &u32) -> u64 {
        (*key % 3) as u64
    }
    fn equal(&self, a: &u32, b: &u32) -> bool {
        a == b
    }
}

// Property: the same invariants under heavy clustering, for both storage
// strategies driven by the same operations.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((_, pool, ops) in arb_scenario()) {
        let mut inline: RobinHoodSet<u32, InlineStorage<u32, 8>, Clustered> = RobinHoodSet::new();
        let mut heap: RobinHoodSet<u32, HeapStorage<u32>, Clustered> =
            RobinHoodSet::with_capacity(8);
        let mut model: HashSet<u32> = HashSet::new();

        for op in ops {
            match op {
                Op::Insert(i) => {
                    let k = pool[i];
                    let expected = model.len() < 8 && !model.contains(&k);
                    prop_assert_eq!(inline.insert(k), expected);
                    prop_assert_eq!(heap.insert(k), expected);
                    if expected {
                        model.insert(k);
                    }
                }
                Op::Erase(i) => {
                    let k = pool[i];
                    let expected = model.remove(&k);
                    prop_assert_eq!(inline.erase(&k), expected);
                    prop_assert_eq!(heap.erase(&k), expected);
                }
                Op::Find(i) => {
                    let k = pool[i];
                    let a = inline.find(&k);
                    let b = heap.find(&k);
                    prop_assert_eq!(a.is_some(), model.contains(&k));
                    prop_assert_eq!(a, b);
                }
                Op::Clear => {
                    inline.clear();
                    heap.clear();
                    model.clear();
                }
                Op::Iterate => {
                    let a: Vec<(Position, u32)> = inline.iter().map(|(p, k)| (p, *k)).collect();
                    let b: Vec<(Position, u32)> = heap.iter().map(|(p, k)| (p, *k)).collect();
                    prop_assert_eq!(a, b);
                }
            }

            prop_assert_eq!(inline.len(), model.len());
            prop_assert_eq!(inline.slots(), heap.slots());
            prop_assert!(inline.slots().iter().filter(|e| e.is_occupied()).count() == model.len());
            check_layout(&inline)?;
        }
    }
}

// Property: placement depends only on the operation sequence.
proptest! {
    #[test]
    fn prop_layout_is_reproducible(keys in proptest::collection::vec(any::<u64>(), 0..64)) {
        let build = || {
            let mut s: DynamicSet<u64> = DynamicSet::with_capacity(48);
            s.extend(keys.iter().copied());
            s.slots().to_vec()
        };
        let a: Vec<Entry<u64>> = build();
        prop_assert_eq!(a, build());
    }
}
