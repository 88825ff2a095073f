//! Two-field value type usable as an element of this crate's containers.

use crate::equals::{native_hash, Equals};
use core::fmt;
use core::hash::Hash;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

/// Field-wise native equality; hash `31 * (31 + h(first)) + h(second)`.
impl<A, B> Equals for Pair<A, B>
where
    A: PartialEq + Hash,
    B: PartialEq + Hash,
{
    fn equals(&self, other: &Self) -> bool {
        self.first == other.first && self.second == other.second
    }

    fn hash_code(&self) -> i32 {
        31i32
            .wrapping_add(native_hash(&self.first))
            .wrapping_mul(31)
            .wrapping_add(native_hash(&self.second))
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Pair<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for Pair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Pair::new(first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_set::HashSet;

    #[test]
    fn equality_is_field_wise() {
        let a = Pair::new("x", 1);
        assert!(a.equals(&Pair::new("x", 1)));
        assert_eq!(a.hash_code(), Pair::new("x", 1).hash_code());
        assert!(!a.equals(&Pair::new("x", 2)));
        assert!(!a.equals(&Pair::new("y", 1)));
    }

    /// Invariant: swapping fields changes the hash for distinct fields.
    #[test]
    fn hash_is_order_sensitive() {
        let ab = Pair::new(1u32, 2u32);
        let ba = Pair::new(2u32, 1u32);
        assert!(!ab.equals(&ba));
        assert_ne!(ab.hash_code(), ba.hash_code());
    }

    #[test]
    fn pairs_as_set_elements() {
        let mut set = HashSet::new();
        assert!(set.insert(Pair::new('a', 1)));
        assert!(set.insert(Pair::new('b', 2)));
        assert!(!set.insert(Pair::from(('a', 1))));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_and_parts() {
        let p = Pair::new("k", 9);
        assert_eq!(p.to_string(), "(k, 9)");
        assert_eq!(*p.first(), "k");
        assert_eq!(*p.second(), 9);
        assert_eq!(p.into_parts(), ("k", 9));
    }
}
