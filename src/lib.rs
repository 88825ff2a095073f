//! assortments: containers whose elements define equality and hashing
//! explicitly instead of through `PartialEq`/`Hash`.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small family of containers that only ever compare elements
//!   through the [`Equals`] capability, so membership semantics are chosen
//!   deliberately by the element type.
//! - Layers:
//!   - `Equals` / `EqualsAdapter`: the capability, and a wrapper that
//!     lifts native `PartialEq + Hash` types into it. `Compares` /
//!     `ComparesAdapter` derive the same capability from a total order.
//!   - `Assortment`: the container base. A container supplies `len` and
//!     `iter`; membership, containment, structural equality, structural
//!     hashing and conversions are provided once on top.
//!   - `HashSet<E>`: separate chaining over a doubling bucket array with a
//!     growth guard against clumping hash functions.
//!   - `LinkedList<E>`: append-at-head list whose `append` splices in O(1)
//!     by sharing nodes with the appended list.
//!
//! Constraints
//! - Single-threaded: `LinkedList` is `!Send`/`!Sync` (`Rc` nodes) and
//!   `HashSet` is `!Sync` (`Cell` phase tracker).
//! - Duplicate inserts and removal from an empty list are silent no-ops.
//! - Buckets never shrink and there is no element removal from a set.
//! - A container's structural hash is the wrapping sum of the hashes of its
//!   distinct elements, so it is independent of iteration order and of
//!   repeats.
//!
//! Reentrancy policy
//! - `HashSet` runs user code (`equals`, `hash_code`) while looking up an
//!   element and while rehashing. It records which of the two is running;
//!   element code that calls back into the same set mid-operation fails a
//!   debug assertion naming the operation.
//! - A rehash computes every new bucket index before moving anything, so a
//!   panicking `hash_code` leaves the set as it was.
//!
//! Notes and non-goals
//! - `LinkedList::append` shares nodes. Mutating the appended list
//!   afterwards is unsupported; it stays memory safe but may reshape the
//!   receiving list.
//! - No thread-safe variants, no set removal, no ordered iteration.
//! - Growth thresholds live in [`ResizePolicy`]; with the `serde` feature
//!   it and the small value types derive `Serialize`/`Deserialize`.

pub mod assortment;
pub mod checks;
pub mod either;
pub mod equals;
pub mod error;
pub mod hash_set;
mod hash_set_proptest;
pub mod linked_list;
pub mod pair;

// Public surface
pub use assortment::Assortment;
pub use either::Either;
pub use equals::{
    native_hash, type_as_compares, type_as_equals, Compares, ComparesAdapter, Equals, EqualsAdapter,
    Identity, NativeHasher,
};
pub use error::AssortmentError;
pub use hash_set::{HashSet, ResizePolicy};
pub use linked_list::LinkedList;
pub use pair::Pair;
