//! Equals: the explicit equality/hash capability and its adapter.
//!
//! Containers in this crate never consult `PartialEq`/`Hash` on their
//! elements. They require [`Equals`], which a type opts into deliberately.
//! Types that already carry native structural equality are brought in
//! through [`EqualsAdapter`].
//!
//! Caveat: the adapter trusts the wrapped type's `PartialEq`/`Hash`. If
//! those compare by address (see [`Identity`]) the adapter silently gives
//! identity semantics, which surprises callers expecting content equality.
//! No error is raised for this.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use core::marker::PhantomData;
use core::ops::Deref;
use std::collections::hash_map::DefaultHasher;
use std::rc::Rc;

/// Structural equality plus a hash contribution consistent with it.
///
/// Implementors must uphold: `a.equals(b)` implies
/// `a.hash_code() == b.hash_code()`. The converse is not required, and a
/// hash contribution may be negative.
pub trait Equals {
    fn equals(&self, other: &Self) -> bool;
    fn hash_code(&self) -> i32;
}

/// Absent values equal each other and contribute nothing to a hash.
impl<E: Equals> Equals for Option<E> {
    fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.equals(b),
            (None, None) => true,
            _ => false,
        }
    }

    fn hash_code(&self) -> i32 {
        self.as_ref().map_or(0, Equals::hash_code)
    }
}

/// Deterministic hasher used to turn native `Hash` into a hash contribution.
///
/// Every instance starts from the same keys, so equal values hash equally
/// across adapters built at different times.
pub type NativeHasher = BuildHasherDefault<DefaultHasher>;

/// Fold a native `Hash` into a 32-bit contribution using `hasher`.
pub fn native_hash_with<T, S>(hasher: &S, value: &T) -> i32
where
    T: ?Sized + Hash,
    S: BuildHasher,
{
    let h = hasher.hash_one(value);
    (h ^ (h >> 32)) as i32
}

/// [`native_hash_with`] using [`NativeHasher`].
pub fn native_hash<T: ?Sized + Hash>(value: &T) -> i32 {
    native_hash_with(&NativeHasher::default(), value)
}

/// Wraps one possibly-absent value and exposes its native equality and hash
/// through [`Equals`].
///
/// Immutable once built. Two adapters are equal iff their inner options are
/// equal under `PartialEq`; absent equals absent.
pub struct EqualsAdapter<T, S = NativeHasher> {
    inner: Option<T>,
    _hasher: PhantomData<fn() -> S>,
}

/// Adapt `value` so it can be stored in this crate's containers.
pub fn type_as_equals<T: PartialEq + Hash>(value: T) -> EqualsAdapter<T> {
    EqualsAdapter::new(value)
}

impl<T, S> EqualsAdapter<T, S> {
    pub fn new(value: T) -> Self {
        Self::from_option(Some(value))
    }

    /// An adapter holding no value.
    pub fn absent() -> Self {
        Self::from_option(None)
    }

    pub fn from_option(inner: Option<T>) -> Self {
        Self {
            inner,
            _hasher: PhantomData,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.inner
    }
}

impl<T, S> Equals for EqualsAdapter<T, S>
where
    T: PartialEq + Hash,
    S: BuildHasher + Default,
{
    fn equals(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn hash_code(&self) -> i32 {
        let h = match &self.inner {
            Some(v) => native_hash_with(&S::default(), v),
            None => 0,
        };
        31i32.wrapping_add(h)
    }
}

impl<T, S> PartialEq for EqualsAdapter<T, S>
where
    T: PartialEq + Hash,
    S: BuildHasher + Default,
{
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T, S> Eq for EqualsAdapter<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
}

impl<T, S> Hash for EqualsAdapter<T, S>
where
    T: PartialEq + Hash,
    S: BuildHasher + Default,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl<T: Clone, S> Clone for EqualsAdapter<T, S> {
    fn clone(&self) -> Self {
        Self::from_option(self.inner.clone())
    }
}

impl<T: fmt::Debug, S> fmt::Debug for EqualsAdapter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EqualsAdapter").field(&self.inner).finish()
    }
}

impl<T: fmt::Display, S> fmt::Display for EqualsAdapter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(v) => v.fmt(f),
            None => f.write_str("-"),
        }
    }
}

/// Equality derived from a total order: `a.equals(b)` holds exactly when
/// `a.compare(b)` is `Ordering::Equal`.
///
/// Implementors still owe a `hash_code` that agrees with that equality.
pub trait Compares: Equals {
    fn compare(&self, other: &Self) -> Ordering;
}

/// Brings an `Ord + Hash` value into the containers with equality taken from
/// `Ord::cmp` instead of `PartialEq`.
///
/// Useful when the order is coarser than `==`, e.g. values that compare
/// equal but carry different labels. `T`'s `Hash` must only feed the parts
/// of the value that `cmp` looks at.
pub struct ComparesAdapter<T, S = NativeHasher> {
    value: T,
    _hasher: PhantomData<fn() -> S>,
}

/// Adapt `value` so containers compare it by order.
pub fn type_as_compares<T: Ord + Hash>(value: T) -> ComparesAdapter<T> {
    ComparesAdapter::new(value)
}

impl<T, S> ComparesAdapter<T, S> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            _hasher: PhantomData,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, S> Equals for ComparesAdapter<T, S>
where
    T: Ord + Hash,
    S: BuildHasher + Default,
{
    fn equals(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    fn hash_code(&self) -> i32 {
        31i32.wrapping_add(native_hash_with(&S::default(), &self.value))
    }
}

impl<T, S> Compares for ComparesAdapter<T, S>
where
    T: Ord + Hash,
    S: BuildHasher + Default,
{
    fn compare(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Ord, S> PartialEq for ComparesAdapter<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.value.cmp(&other.value) == Ordering::Equal
    }
}

impl<T: Ord, S> Eq for ComparesAdapter<T, S> {}

impl<T: Ord, S> PartialOrd for ComparesAdapter<T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord, S> Ord for ComparesAdapter<T, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Clone, S> Clone for ComparesAdapter<T, S> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ComparesAdapter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComparesAdapter").field(&self.value).finish()
    }
}

impl<T: fmt::Display, S> fmt::Display for ComparesAdapter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// Shared value compared and hashed by address rather than content.
///
/// Useful for types with no meaningful structural equality; two
/// `Identity` handles are equal only when they point at the same allocation.
pub struct Identity<T: ?Sized>(Rc<T>);

impl<T> Identity<T> {
    pub fn new(value: T) -> Self {
        Identity(Rc::new(value))
    }
}

impl<T: ?Sized> Identity<T> {
    pub fn from_rc(rc: Rc<T>) -> Self {
        Identity(rc)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl<T: ?Sized> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Identity(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for Identity<T> {}

impl<T: ?Sized> Hash for Identity<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<T: ?Sized> Deref for Identity<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({:#x})", self.addr())
    }
}
