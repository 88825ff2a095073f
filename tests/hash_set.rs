// HashSet integration suite.
//
// Core invariants exercised:
// - Uniqueness: no two stored elements are equal under `Equals`.
// - Bucket index: an element lives at `hash_code mod bucket_count`, so
//   negative hash contributions are safe.
// - Growth: the array doubles once size exceeds three elements per bucket,
//   unless more than 83% of buckets are empty.
// - Iteration: bucket order, insertion order within a bucket, exactly
//   `len` items per traversal.
// - Structural equality and hashing ignore insertion order.
use assortments::{
    type_as_equals, Assortment, AssortmentError, Equals, EqualsAdapter, HashSet, LinkedList,
    ResizePolicy,
};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
struct Num(i32);
impl Equals for Num {
    fn equals(&self, other: &Self) -> bool {
        self.0 == other.0
    }
    fn hash_code(&self) -> i32 {
        self.0
    }
}
impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Scenario: string elements through the adapter; a duplicate insert leaves
// the size unchanged.
#[test]
fn duplicate_strings_are_ignored() {
    let mut set = HashSet::new();
    for s in ["a", "b", "c"] {
        assert!(set.insert(type_as_equals(s.to_string())));
    }
    assert!(!set.insert(type_as_equals("a".to_string())));
    assert_eq!(set.len(), 3);
    assert!(set.contains(&type_as_equals("b".to_string())));
    assert!(!set.contains(&type_as_equals("z".to_string())));
}

// Scenario: growth boundary with identity hashes on three buckets.
// Verifies: the tenth insert doubles the array; earlier ones do not.
#[test]
fn tenth_insert_doubles_buckets() {
    let mut set = HashSet::new();
    for i in 0..9 {
        set.insert(Num(i));
        assert_eq!(set.bucket_count(), 3, "after {} inserts", i + 1);
    }
    set.insert(Num(9));
    assert_eq!(set.bucket_count(), 6);
    assert_eq!(set.len(), 10);
    for i in 0..10 {
        assert!(set.contains(&Num(i)));
    }
}

// Scenario: every element hashes to one bucket, so the empty-bucket guard
// holds the array size fixed once enough buckets sit empty.
#[test]
fn clumping_hash_suppresses_growth() {
    #[derive(Clone, Debug)]
    struct Same(u32);
    impl Equals for Same {
        fn equals(&self, other: &Self) -> bool {
            self.0 == other.0
        }
        fn hash_code(&self) -> i32 {
            -7
        }
    }

    let mut set = HashSet::with_capacity(12).expect("capacity");
    for i in 0..500 {
        set.insert(Same(i));
    }
    assert_eq!(set.bucket_count(), 12);
    assert_eq!(set.empty_bucket_count(), 11);
    assert_eq!(set.len(), 500);
    assert!(set.contains(&Same(499)));
}

// Scenario: configuration via ResizePolicy; a load factor of 1 grows as
// soon as size exceeds the bucket count.
#[test]
fn policy_controls_growth() {
    let policy = ResizePolicy::new(1.0, 1).expect("valid policy");
    let mut set = HashSet::with_policy(2, policy).expect("capacity");
    set.insert(Num(0));
    set.insert(Num(1));
    assert_eq!(set.bucket_count(), 2);
    set.insert(Num(2));
    assert_eq!(set.bucket_count(), 4);
    assert_eq!(set.policy(), &policy);

    assert!(matches!(
        ResizePolicy::new(1.5, 3),
        Err(AssortmentError::InvariantViolation(_))
    ));
    assert!(matches!(
        HashSet::<Num>::with_capacity(0),
        Err(AssortmentError::InvariantViolation(_))
    ));
}

// Scenario: the same elements inserted in different orders.
#[test]
fn equality_ignores_insertion_order() {
    let a: HashSet<_> = [5, -3, 11, 0, 42].into_iter().map(Num).collect();
    let b: HashSet<_> = [42, 0, 11, -3, 5].into_iter().map(Num).collect();
    assert!(a.equals(&b));
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());

    let c: HashSet<_> = [42, 0, 11, -3].into_iter().map(Num).collect();
    assert_ne!(a, c);
}

// Scenario: containment across container kinds sharing an element type.
#[test]
fn containment_across_containers() {
    let set: HashSet<EqualsAdapter<&str>> = ["a", "b", "c", "d"].into_iter().map(type_as_equals).collect();
    let list: LinkedList<EqualsAdapter<&str>> = ["d", "b"].into_iter().map(type_as_equals).collect();
    let other: LinkedList<EqualsAdapter<&str>> = ["x", "y"].into_iter().map(type_as_equals).collect();
    let empty: LinkedList<EqualsAdapter<&str>> = LinkedList::new();

    assert!(set.contains_all(&list));
    assert!(set.contains_any(&list));
    assert!(!set.contains_any(&other));
    assert!(set.contains_all(&empty));
    assert!(!set.contains_any(&empty));
    assert!(!list.contains_all(&set));
}

// Scenario: nested sets; equality of elements is structural all the way down.
#[test]
fn sets_of_sets() {
    let inner = |xs: &[i32]| -> HashSet<Num> { xs.iter().copied().map(Num).collect() };
    let mut outer = HashSet::new();
    assert!(outer.insert(inner(&[1, 2, 3])));
    assert!(!outer.insert(inner(&[3, 2, 1])));
    assert!(outer.insert(inner(&[1, 2])));
    assert_eq!(outer.len(), 2);
}

// Scenario: absent elements through Option.
#[test]
fn absent_elements_are_members() {
    let mut set: HashSet<Option<Num>> = HashSet::new();
    assert!(set.insert(None));
    assert!(!set.insert(None));
    assert!(set.insert(Some(Num(0))));
    assert!(set.contains(&None));
    assert_eq!(set.len(), 2);
    assert_eq!(set.hash_code(), 0);
}

// Scenario: conversions produce exactly `len` elements, all members.
#[test]
fn conversions() {
    let set: HashSet<_> = (0..25).map(Num).collect();
    let v: Vec<Num> = set.to_collection();
    assert_eq!(v.len(), 25);
    assert!(v.iter().all(|e| set.contains(e)));
    assert_eq!(set.to_array().len(), 25);
    assert_eq!(HashSet::<Num>::new().to_array().len(), 0);

    let mut it = set.iter();
    assert_eq!(it.len(), 25);
    for _ in 0..25 {
        assert!(it.try_next().is_ok());
    }
    assert_eq!(it.try_next(), Err(AssortmentError::Exhausted));
}

#[test]
fn display_shows_bucket_layout() {
    let mut set = HashSet::new();
    set.insert(Num(3));
    set.insert(Num(1));
    assert_eq!(set.to_string(), "0   1   2  \n↓   ↓   ↓  \n{3} {1} {} ");
}
