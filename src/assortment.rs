//! Assortment: operations shared by every container of `Equals` elements.
//!
//! A container supplies `len` and `iter`; membership, structural equality,
//! structural hashing and conversions are written once here against the
//! `Equals` capability.

use crate::equals::Equals;
use core::ops::Deref;

pub trait Assortment {
    type Item: Equals;

    /// Borrow of one element as yielded by iteration.
    type ItemRef<'a>: Deref<Target = Self::Item>
    where
        Self: 'a;

    /// Lazy, finite traversal. Each call to [`Assortment::iter`] returns an
    /// independently positioned iterator that ends after `len()` items.
    type Iter<'a>: Iterator<Item = Self::ItemRef<'a>>
    where
        Self: 'a;

    fn len(&self) -> usize;

    fn iter(&self) -> Self::Iter<'_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership by `Equals::equals`, never by address.
    fn contains(&self, element: &Self::Item) -> bool {
        self.iter().any(|e| (*e).equals(element))
    }

    /// True when every element of `other` is contained here. Vacuously true
    /// for an empty `other`.
    fn contains_all<A>(&self, other: &A) -> bool
    where
        A: Assortment<Item = Self::Item> + ?Sized,
    {
        other.iter().all(|e| self.contains(&*e))
    }

    /// True when at least one element of `other` is contained here. Always
    /// false for an empty `other`.
    fn contains_any<A>(&self, other: &A) -> bool
    where
        A: Assortment<Item = Self::Item> + ?Sized,
    {
        other.iter().any(|e| self.contains(&*e))
    }

    /// Structural equality: same size and mutual containment.
    fn same_elements(&self, other: &Self) -> bool {
        self.len() == other.len() && self.contains_all(other) && other.contains_all(self)
    }

    /// Order-independent structural hash: the wrapping sum of the hash
    /// contributions of distinct elements.
    ///
    /// An element equal to an earlier one is skipped, so two containers
    /// accepted by `same_elements` hash equally even when one repeats
    /// elements. Containers that never hold duplicates may override this
    /// with a plain sum.
    fn assortment_hash(&self) -> i32 {
        let mut hash = 0i32;
        for (i, e) in self.iter().enumerate() {
            if !self.iter().take(i).any(|prior| (*prior).equals(&*e)) {
                hash = hash.wrapping_add((*e).hash_code());
            }
        }
        hash
    }

    /// Collect clones of the current elements into any collection type.
    fn to_collection<C>(&self) -> C
    where
        C: FromIterator<Self::Item>,
        Self::Item: Clone,
    {
        self.iter().map(|e| <Self::Item as Clone>::clone(&*e)).collect()
    }

    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter().map(|e| <Self::Item as Clone>::clone(&*e)));
        out
    }

    /// Fixed-size snapshot of the current elements.
    fn to_array(&self) -> Box<[Self::Item]>
    where
        Self::Item: Clone,
    {
        self.to_vec().into_boxed_slice()
    }
}
