#![cfg(test)]

// Property tests for HashSet kept inside the crate so they can inspect bucket
// counters directly.

use crate::assortment::Assortment;
use crate::equals::{type_as_equals, Equals, EqualsAdapter};
use crate::hash_set::{HashSet, ResizePolicy};
use proptest::prelude::*;
use std::collections::HashSet as StdHashSet;

// Element whose hash collapses onto a handful of values, exercising long
// chains and the empty-bucket growth guard.
#[derive(Clone, Debug, PartialEq)]
struct Clumped(i32);
impl Equals for Clumped {
    fn equals(&self, other: &Self) -> bool {
        self.0 == other.0
    }
    fn hash_code(&self) -> i32 {
        self.0.rem_euclid(4) - 2
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(i32),
    Contains(i32),
    Iterate,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => (-64i32..64).prop_map(Op::Insert),
        2 => (-64i32..64).prop_map(Op::Contains),
        1 => Just(Op::Iterate),
    ];
    proptest::collection::vec(op, 1..200)
}

fn check_counters<E: Equals>(set: &HashSet<E>) -> Result<(), TestCaseError> {
    prop_assert!(set.bucket_count() >= 1);
    prop_assert!(set.empty_bucket_count() <= set.bucket_count());
    prop_assert_eq!(set.iter().count(), set.len());
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// - `insert` reports true exactly when the model did not hold the value.
// - `contains` parity with the model after every op.
// - `iter` yields each element exactly once; its set equals the model's.
// - Counters stay consistent with the bucket array.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut: HashSet<EqualsAdapter<i32>> = HashSet::new();
        let mut model: StdHashSet<i32> = StdHashSet::new();
        for op in ops {
            match op {
                Op::Insert(v) => {
                    prop_assert_eq!(sut.insert(type_as_equals(v)), model.insert(v));
                }
                Op::Contains(v) => {
                    prop_assert_eq!(sut.contains(&type_as_equals(v)), model.contains(&v));
                }
                Op::Iterate => {
                    let seen: Vec<i32> = sut.iter().filter_map(|e| e.get().copied()).collect();
                    let unique: StdHashSet<i32> = seen.iter().copied().collect();
                    prop_assert_eq!(seen.len(), unique.len());
                    prop_assert_eq!(&unique, &model);
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            check_counters(&sut)?;
        }
    }

    // Same machine with a clumping hash and a non-default policy.
    #[test]
    fn prop_state_machine_clumped(ops in arb_ops(), load_factor in 1usize..4) {
        let policy = ResizePolicy::new(ResizePolicy::DEFAULT_MAX_EMPTY_RATIO, load_factor)
            .expect("valid policy");
        let mut sut: HashSet<Clumped> = HashSet::with_policy(3, policy).expect("valid capacity");
        let mut model: StdHashSet<i32> = StdHashSet::new();
        for op in ops {
            match op {
                Op::Insert(v) => {
                    prop_assert_eq!(sut.insert(Clumped(v)), model.insert(v));
                }
                Op::Contains(v) => {
                    prop_assert_eq!(sut.contains(&Clumped(v)), model.contains(&v));
                }
                Op::Iterate => {
                    let seen: StdHashSet<i32> = sut.iter().map(|e| e.0).collect();
                    prop_assert_eq!(&seen, &model);
                }
            }
            check_counters(&sut)?;
        }
        prop_assert_eq!(sut.len(), model.len());
    }

    // Property: insertion order never affects equality or the structural hash.
    #[test]
    fn prop_order_independent(values in proptest::collection::vec(any::<i32>(), 0..100)) {
        let forward: HashSet<_> = values.iter().copied().map(type_as_equals).collect();
        let backward: HashSet<_> = values.iter().rev().copied().map(type_as_equals).collect();
        prop_assert!(forward.equals(&backward));
        prop_assert_eq!(forward.hash_code(), backward.hash_code());
    }

    // Property: snapshots hold every element once, and rebuilding from a
    // snapshot gives an equal set.
    #[test]
    fn prop_to_array_rebuilds(values in proptest::collection::vec(-50i32..50, 0..80)) {
        let set: HashSet<_> = values.into_iter().map(type_as_equals).collect();
        let snapshot = set.to_array();
        prop_assert_eq!(snapshot.len(), set.len());
        let rebuilt: HashSet<_> = snapshot.iter().cloned().collect();
        prop_assert!(rebuilt == set);
    }

    // Property: containsAll of an empty argument is vacuously true and
    // containsAny of it is always false.
    #[test]
    fn prop_empty_argument(values in proptest::collection::vec(any::<i32>(), 0..40)) {
        let set: HashSet<_> = values.into_iter().map(type_as_equals).collect();
        let empty: HashSet<EqualsAdapter<i32>> = HashSet::new();
        prop_assert!(set.contains_all(&empty));
        prop_assert!(!set.contains_any(&empty));
    }
}
