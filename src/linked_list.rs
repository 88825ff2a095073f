//! LinkedList: append-at-head list whose `append` splices by sharing nodes.
//!
//! Nodes are reference counted. The forward link is strong and the back
//! link weak, so the chain reachable from `first` owns every node while
//! `remove` can still step back from `head` in O(1).
//!
//! `append(other)` links `other`'s first node after this list's head and
//! adopts `other`'s head. Both lists then share those nodes. Iterating
//! `other` afterwards still yields exactly its own elements, but mutating
//! `other` after the splice is unsupported: it may reshape this list too.
//! Memory safety is preserved either way.
//!
//! Appending a list whose head is already this list's head (the same list
//! appended twice in a row, or a list appended back into the one it was
//! spliced onto) is a no-op. Other orders that feed a list's nodes back into
//! a list already reaching them form a reference cycle; those nodes are
//! leaked rather than freed.

use crate::assortment::Assortment;
use crate::equals::Equals;
use crate::error::AssortmentError;
use core::cell::RefCell;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::Deref;
use std::rc::{Rc, Weak};

struct Node<E> {
    element: E,
    next: RefCell<Option<Rc<Node<E>>>>,
    previous: RefCell<Weak<Node<E>>>,
}

pub struct LinkedList<E> {
    first: Option<Rc<Node<E>>>,
    head: Option<Rc<Node<E>>>,
    len: usize,
}

impl<E> LinkedList<E> {
    pub fn new() -> Self {
        Self {
            first: None,
            head: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `element` after the current head; it becomes the new head.
    pub fn add(&mut self, element: E) {
        let previous = self.head.as_ref().map_or_else(Weak::new, Rc::downgrade);
        let node = Rc::new(Node {
            element,
            next: RefCell::new(None),
            previous: RefCell::new(previous),
        });
        match &self.head {
            Some(head) => *head.next.borrow_mut() = Some(Rc::clone(&node)),
            None => self.first = Some(Rc::clone(&node)),
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Step the head back to its predecessor and detach the old head.
    ///
    /// Returns `false` when the list was already empty; removing from an
    /// empty list is a no-op.
    pub fn remove(&mut self) -> bool {
        let Some(old) = self.head.take() else {
            return false;
        };
        let previous = old.previous.borrow().upgrade();
        match &previous {
            Some(p) => {
                p.next.borrow_mut().take();
                self.len = self.len.saturating_sub(1);
            }
            None => {
                self.first = None;
                self.len = 0;
            }
        }
        self.head = previous;
        true
    }

    /// The most recently added element, if any.
    pub fn get(&self) -> Option<&E> {
        self.head.as_deref().map(|n| &n.element)
    }

    /// Splice `other`'s nodes onto this list in O(1) without copying.
    pub fn append(&mut self, other: &LinkedList<E>) {
        let (Some(other_first), Some(other_head)) = (&other.first, &other.head) else {
            return;
        };
        if let Some(head) = &self.head {
            if Rc::ptr_eq(head, other_head) {
                tracing::trace!(len = self.len, "linked list already ends with the appended chain");
                return;
            }
        }
        match &self.head {
            Some(head) => {
                *other_first.previous.borrow_mut() = Rc::downgrade(head);
                *head.next.borrow_mut() = Some(Rc::clone(other_first));
            }
            None => self.first = Some(Rc::clone(other_first)),
        }
        self.head = Some(Rc::clone(other_head));
        self.len += other.len;
        tracing::trace!(appended = other.len, len = self.len, "linked list spliced");
    }

    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            next: self.first.clone(),
            remaining: self.len,
            _list: PhantomData,
        }
    }
}

impl<E> Default for LinkedList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Drop for LinkedList<E> {
    // Unlink iteratively so long chains do not recurse on drop. Stops at
    // the first node still shared with another list.
    fn drop(&mut self) {
        self.head = None;
        let mut cursor = self.first.take();
        while let Some(node) = cursor {
            match Rc::try_unwrap(node) {
                Ok(node) => cursor = node.next.into_inner(),
                Err(_) => break,
            }
        }
    }
}

/// Deep copy: the clone owns fresh nodes.
impl<E: Clone> Clone for LinkedList<E> {
    fn clone(&self) -> Self {
        let mut list = LinkedList::new();
        for e in self.iter() {
            list.add(E::clone(&e));
        }
        list
    }
}

impl<E: Equals> Assortment for LinkedList<E> {
    type Item = E;
    type ItemRef<'a>
        = NodeRef<'a, E>
    where
        E: 'a;
    type Iter<'a>
        = Iter<'a, E>
    where
        E: 'a;

    fn len(&self) -> usize {
        self.len
    }

    fn iter(&self) -> Iter<'_, E> {
        LinkedList::iter(self)
    }
}

impl<E: Equals> Equals for LinkedList<E> {
    fn equals(&self, other: &Self) -> bool {
        self.same_elements(other)
    }

    fn hash_code(&self) -> i32 {
        self.assortment_hash()
    }
}

impl<E: Equals> PartialEq for LinkedList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.same_elements(other)
    }
}

impl<E> Extend<E> for LinkedList<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for e in iter {
            self.add(e);
        }
    }
}

impl<E> FromIterator<E> for LinkedList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<'a, E> IntoIterator for &'a LinkedList<E> {
    type Item = NodeRef<'a, E>;
    type IntoIter = Iter<'a, E>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: fmt::Debug> fmt::Debug for LinkedList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// `[a->b->c]`, or `[]` when empty.
impl<E: fmt::Display> fmt::Display for LinkedList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("->")?;
            }
            write!(f, "{}", *e)?;
        }
        f.write_str("]")
    }
}

/// Shared handle to one element, valid while the list is borrowed.
pub struct NodeRef<'a, E> {
    node: Rc<Node<E>>,
    _list: PhantomData<&'a LinkedList<E>>,
}

impl<E> Deref for NodeRef<'_, E> {
    type Target = E;
    fn deref(&self) -> &E {
        &self.node.element
    }
}

impl<E> Clone for NodeRef<'_, E> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
            _list: PhantomData,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for NodeRef<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.element.fmt(f)
    }
}

/// Forward traversal from `first`, bounded by the list length.
pub struct Iter<'a, E> {
    next: Option<Rc<Node<E>>>,
    remaining: usize,
    _list: PhantomData<&'a LinkedList<E>>,
}

impl<'a, E> Iter<'a, E> {
    /// Like `next`, but reports exhaustion as an error.
    pub fn try_next(&mut self) -> Result<NodeRef<'a, E>, AssortmentError> {
        self.next().ok_or(AssortmentError::Exhausted)
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = NodeRef<'a, E>;

    fn next(&mut self) -> Option<NodeRef<'a, E>> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.next.take()?;
        self.next = node.next.borrow().clone();
        self.remaining -= 1;
        Some(NodeRef {
            node,
            _list: PhantomData,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> FusedIterator for Iter<'_, E> {}
