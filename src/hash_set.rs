//! HashSet: separate chaining over a growable bucket array.
//!
//! Layout
//! - `buckets: Vec<Vec<E>>`; an element lives in bucket
//!   `hash_code().rem_euclid(bucket_count)`, so negative hash contributions
//!   index in range by construction.
//! - `len` and the number of empty buckets are maintained on every insert,
//!   never recomputed.
//!
//! Growth
//! - Evaluated after every successful insert. If more than
//!   `max_empty_ratio` of the buckets are empty the hash function is
//!   clumping elements and growth would not help, so nothing happens.
//!   Otherwise the array doubles once `len > bucket_count * load_factor`.
//! - Buckets never shrink. A rehash computes every new index first and only
//!   then moves elements into a fresh array that replaces the old one, so a
//!   panicking `hash_code` leaves the set untouched.
//!
//! Iteration visits buckets in array order and each bucket in insertion
//! order. That order is a layout artifact; equality and hashing of sets do
//! not depend on it.

use crate::assortment::Assortment;
use crate::checks;
use crate::equals::Equals;
use crate::error::AssortmentError;
use core::cell::Cell;
use core::fmt;
use core::iter::FusedIterator;

/// Bucket count used by [`HashSet::new`].
pub const DEFAULT_BUCKET_COUNT: usize = 3;

/// Tunable growth thresholds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawResizePolicy"))]
pub struct ResizePolicy {
    max_empty_ratio: f64,
    load_factor: usize,
}

// Unchecked wire form; every deserialized policy goes through `new`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawResizePolicy {
    max_empty_ratio: f64,
    load_factor: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawResizePolicy> for ResizePolicy {
    type Error = AssortmentError;

    fn try_from(raw: RawResizePolicy) -> Result<Self, Self::Error> {
        ResizePolicy::new(raw.max_empty_ratio, raw.load_factor)
    }
}

impl ResizePolicy {
    pub const DEFAULT_MAX_EMPTY_RATIO: f64 = 0.83;
    pub const DEFAULT_LOAD_FACTOR: usize = 3;

    /// `max_empty_ratio` must lie in `[0, 1]` and `load_factor` must be at
    /// least 1.
    pub fn new(max_empty_ratio: f64, load_factor: usize) -> Result<Self, AssortmentError> {
        let max_empty_ratio = checks::ensure(
            max_empty_ratio,
            |r| (0.0..=1.0).contains(r),
            format!("max_empty_ratio must be within [0, 1], got {max_empty_ratio}"),
        )?;
        let load_factor = checks::ensure(load_factor, |f| *f >= 1, "load_factor must be >= 1")?;
        Ok(Self {
            max_empty_ratio,
            load_factor,
        })
    }

    pub fn max_empty_ratio(&self) -> f64 {
        self.max_empty_ratio
    }

    pub fn load_factor(&self) -> usize {
        self.load_factor
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            max_empty_ratio: Self::DEFAULT_MAX_EMPTY_RATIO,
            load_factor: Self::DEFAULT_LOAD_FACTOR,
        }
    }
}

#[inline]
fn bucket_index(hash: i32, bucket_count: usize) -> usize {
    i64::from(hash).rem_euclid(bucket_count as i64) as usize
}

fn empty_buckets<E>(count: usize) -> Vec<Vec<E>> {
    (0..count).map(|_| Vec::new()).collect()
}

// What the set is doing while element code (`equals`, `hash_code`) runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Lookup,
    Rehash,
}

impl Phase {
    fn describe(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Lookup => "looking up an element",
            Phase::Rehash => "rehashing",
        }
    }
}

// Records the running operation. Element code that calls back into the set
// mid-operation trips a debug assertion naming that operation.
#[derive(Debug)]
struct PhaseTracker(Cell<Phase>);

impl PhaseTracker {
    const fn new() -> Self {
        Self(Cell::new(Phase::Idle))
    }

    fn current(&self) -> Phase {
        self.0.get()
    }

    fn begin(&self, phase: Phase) -> PhaseScope<'_> {
        let running = self.current();
        debug_assert!(
            running == Phase::Idle,
            "hash set re-entered from element code while {}",
            running.describe()
        );
        self.0.set(phase);
        PhaseScope { tracker: self }
    }
}

// Returns the tracker to `Idle` on drop, including during unwinding.
struct PhaseScope<'a> {
    tracker: &'a PhaseTracker,
}

impl PhaseScope<'_> {
    fn advance(&self, phase: Phase) {
        self.tracker.0.set(phase);
    }
}

impl Drop for PhaseScope<'_> {
    fn drop(&mut self) {
        self.tracker.0.set(Phase::Idle);
    }
}

// Bucket storage. Kept apart from the tracker so `insert` can hold a phase
// scope while mutating the table.
struct Table<E> {
    buckets: Vec<Vec<E>>,
    len: usize,
    empty: usize,
}

impl<E: Equals> Table<E> {
    fn with_buckets(count: usize) -> Self {
        Self {
            buckets: empty_buckets(count),
            len: 0,
            empty: count,
        }
    }

    fn find(&self, element: &E) -> bool {
        let index = bucket_index(element.hash_code(), self.buckets.len());
        self.buckets[index].iter().any(|e| e.equals(element))
    }

    fn insert(&mut self, element: E, policy: &ResizePolicy, scope: &PhaseScope<'_>) -> bool {
        let index = bucket_index(element.hash_code(), self.buckets.len());
        let bucket = &mut self.buckets[index];
        if bucket.iter().any(|e| e.equals(&element)) {
            return false;
        }
        if bucket.is_empty() {
            self.empty -= 1;
        }
        bucket.push(element);
        self.len += 1;
        self.grow_if_required(policy, scope);
        true
    }

    fn grow_if_required(&mut self, policy: &ResizePolicy, scope: &PhaseScope<'_>) {
        let bucket_count = self.buckets.len();
        let threshold = bucket_count.saturating_mul(policy.load_factor);

        let empty_ratio = self.empty as f64 / bucket_count as f64;
        if empty_ratio > policy.max_empty_ratio {
            if self.len > threshold {
                tracing::trace!(
                    len = self.len,
                    bucket_count,
                    empty = self.empty,
                    "growth suppressed by empty-bucket guard"
                );
            }
            return;
        }

        if self.len > threshold {
            scope.advance(Phase::Rehash);
            self.rehash(bucket_count.saturating_mul(2));
        }
    }

    fn rehash(&mut self, new_count: usize) {
        // All calls into user code happen before anything is moved.
        let indices: Vec<usize> = self
            .buckets
            .iter()
            .flatten()
            .map(|e| bucket_index(e.hash_code(), new_count))
            .collect();

        let mut buckets = empty_buckets(new_count);
        let old = core::mem::take(&mut self.buckets);
        let old_count = old.len();
        for (element, index) in old.into_iter().flatten().zip(indices) {
            buckets[index].push(element);
        }

        self.empty = buckets.iter().filter(|b| b.is_empty()).count();
        self.buckets = buckets;
        tracing::debug!(
            from = old_count,
            to = new_count,
            len = self.len,
            empty = self.empty,
            "hash set bucket array doubled"
        );
    }
}

/// Chained hash set of `Equals` elements.
///
/// Duplicate inserts are silently ignored. Elements are never removed.
pub struct HashSet<E> {
    table: Table<E>,
    policy: ResizePolicy,
    phase: PhaseTracker,
}

impl<E: Equals> HashSet<E> {
    /// Empty set with [`DEFAULT_BUCKET_COUNT`] buckets and the default policy.
    pub fn new() -> Self {
        Self::from_parts(DEFAULT_BUCKET_COUNT, ResizePolicy::default())
    }

    /// Empty set with `bucket_count` initial buckets; zero is rejected.
    pub fn with_capacity(bucket_count: usize) -> Result<Self, AssortmentError> {
        Self::with_policy(bucket_count, ResizePolicy::default())
    }

    pub fn with_policy(bucket_count: usize, policy: ResizePolicy) -> Result<Self, AssortmentError> {
        let bucket_count =
            checks::ensure(bucket_count, |n| *n > 0, "initial bucket count must be > 0")?;
        Ok(Self::from_parts(bucket_count, policy))
    }

    fn from_parts(bucket_count: usize, policy: ResizePolicy) -> Self {
        Self {
            table: Table::with_buckets(bucket_count),
            policy,
            phase: PhaseTracker::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len
    }

    pub fn is_empty(&self) -> bool {
        self.table.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.table.buckets.len()
    }

    pub fn empty_bucket_count(&self) -> usize {
        self.table.empty
    }

    pub fn policy(&self) -> &ResizePolicy {
        &self.policy
    }

    /// Membership by `Equals::equals`, probing only the element's bucket.
    pub fn contains(&self, element: &E) -> bool {
        let _scope = self.phase.begin(Phase::Lookup);
        self.table.find(element)
    }

    /// Insert `element` unless an equal one is present. Returns whether the
    /// set changed. May grow the bucket array, which costs O(len).
    pub fn insert(&mut self, element: E) -> bool {
        let scope = self.phase.begin(Phase::Lookup);
        self.table.insert(element, &self.policy, &scope)
    }

    /// Insert a clone of every element of `other`.
    pub fn insert_all(&mut self, other: &HashSet<E>)
    where
        E: Clone,
    {
        for element in other.iter() {
            self.insert(element.clone());
        }
    }

    /// Insert each element in turn; returns how many were new.
    pub fn insert_each<I>(&mut self, elements: I) -> usize
    where
        I: IntoIterator<Item = E>,
    {
        elements
            .into_iter()
            .map(|e| self.insert(e))
            .filter(|added| *added)
            .count()
    }

    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            buckets: &self.table.buckets,
            bucket: 0,
            offset: 0,
            remaining: self.table.len,
        }
    }
}

impl<E: Equals> Default for HashSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Equals + Clone> Clone for HashSet<E> {
    fn clone(&self) -> Self {
        Self {
            table: Table {
                buckets: self.table.buckets.clone(),
                len: self.table.len,
                empty: self.table.empty,
            },
            policy: self.policy,
            phase: PhaseTracker::new(),
        }
    }
}

impl<E: Equals> Assortment for HashSet<E> {
    type Item = E;
    type ItemRef<'a>
        = &'a E
    where
        E: 'a;
    type Iter<'a>
        = Iter<'a, E>
    where
        E: 'a;

    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn iter(&self) -> Iter<'_, E> {
        HashSet::iter(self)
    }

    fn contains(&self, element: &E) -> bool {
        HashSet::contains(self, element)
    }

    // Elements are already distinct.
    fn assortment_hash(&self) -> i32 {
        self.iter()
            .fold(0i32, |acc, e| acc.wrapping_add(e.hash_code()))
    }
}

impl<E: Equals> Equals for HashSet<E> {
    fn equals(&self, other: &Self) -> bool {
        self.same_elements(other)
    }

    fn hash_code(&self) -> i32 {
        self.assortment_hash()
    }
}

impl<E: Equals> PartialEq for HashSet<E> {
    fn eq(&self, other: &Self) -> bool {
        self.same_elements(other)
    }
}

impl<E: Equals> Extend<E> for HashSet<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.insert_each(iter);
    }
}

impl<E: Equals> FromIterator<E> for HashSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.insert_each(iter);
        set
    }
}

impl<'a, E: Equals> IntoIterator for &'a HashSet<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Equals + fmt::Debug> fmt::Debug for HashSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Diagnostic rendering: a row of bucket indices, a row of arrows and a row
/// of bucket contents, loosely aligned. Not meant to be parsed.
impl<E: Equals + fmt::Display> fmt::Display for HashSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut indexes = String::new();
        let mut arrows = String::new();
        let mut elements = String::new();
        let (mut index_width, mut arrow_width, mut element_width) = (0usize, 0usize, 0usize);

        for (i, bucket) in self.table.buckets.iter().enumerate() {
            let label = format!("{i} ");
            index_width += label.chars().count();
            indexes.push_str(&label);
            arrows.push_str("↓ ");
            arrow_width += 2;

            let body = bucket
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let cell = format!("{{{body}}} ");
            element_width += cell.chars().count();
            elements.push_str(&cell);

            let pad = element_width.saturating_sub(index_width);
            indexes.extend(core::iter::repeat(' ').take(pad));
            index_width += pad;
            let pad = element_width.saturating_sub(arrow_width);
            arrows.extend(core::iter::repeat(' ').take(pad));
            arrow_width += pad;
        }

        writeln!(f, "{indexes}")?;
        writeln!(f, "{arrows}")?;
        f.write_str(&elements)
    }
}

/// Cursor over the bucket array: `(bucket, offset)` plus the number of
/// elements left to yield.
pub struct Iter<'a, E> {
    buckets: &'a [Vec<E>],
    bucket: usize,
    offset: usize,
    remaining: usize,
}

impl<'a, E> Iter<'a, E> {
    /// Like `next`, but reports exhaustion as an error so it cannot be
    /// confused with an absent element value.
    pub fn try_next(&mut self) -> Result<&'a E, AssortmentError> {
        self.next().ok_or(AssortmentError::Exhausted)
    }
}

impl<'a, E> Clone for Iter<'a, E> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets,
            bucket: self.bucket,
            offset: self.offset,
            remaining: self.remaining,
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        if self.remaining == 0 {
            return None;
        }
        while let Some(bucket) = self.buckets.get(self.bucket) {
            if let Some(element) = bucket.get(self.offset) {
                self.offset += 1;
                self.remaining -= 1;
                return Some(element);
            }
            self.bucket += 1;
            self.offset = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}
