//! Singly linked lists of integers, laid out the way the LeetCode Rust harness
//! declares them.
//!
//! Every operation walks the list with a loop. Dropping, comparing, cloning or
//! printing a list of any length uses constant stack space.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use crate::seq::write_bracketed;

/// A list node.

#[derive(Eq)]
pub struct ListNode {
  /// The value held by this node.
  pub val: i32,
  /// The rest of the list.
  pub next: Option<Box<ListNode>>,
}

/// A possibly empty list, owned through its head.

pub type Link = Option<Box<ListNode>>;

/// An iterator over the values of a list, head to tail.

#[derive(Clone)]
pub struct Iter<'a> {
  next: Option<&'a ListNode>,
}

/// A possibly empty list rendered as `[1,2,3]`.

#[derive(Clone, Copy)]
pub struct Show<'a>(&'a Link);

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Link                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// Builds a list holding `input` in order.
///
/// An empty input gives `None`. Each node is a fresh allocation owned by its
/// predecessor.

pub fn build<I>(input: I) -> Link
where
  I: IntoIterator<Item = i32>
{
  let mut head = None;
  let mut tail = &mut head;

  for val in input {
    tail = &mut tail.insert(Box::new(ListNode::new(val))).next;
  }

  head
}

/// Structural equality of two possibly empty lists.
///
/// Two empty lists are equal. A list is never equal to a strict prefix of
/// itself.

pub fn eq(a: &Link, b: &Link) -> bool {
  match (a, b) {
    (Some(a), Some(b)) => **a == **b,
    (None, None) => true,
    _ => false,
  }
}

/// Releases every node of `list`, head to tail.
///
/// Passing `None` does nothing.

pub fn destroy(list: Link) {
  let mut n = 0_usize;
  let mut next = list;

  while let Some(mut node) = next {
    next = node.next.take();
    n = n + 1;
  }

  log::trace!("released {} list nodes", n);
}

/// Renders a possibly empty list; `None` renders as `[]`.

pub fn show(list: &Link) -> Show<'_> {
  Show(list)
}

/// Iterates over the values of a possibly empty list.

pub fn values(list: &Link) -> Iter<'_> {
  Iter { next: list.as_deref() }
}

/// Collects the values of a possibly empty list.

pub fn to_vec(list: &Link) -> Vec<i32> {
  values(list).collect()
}

impl<'a> fmt::Display for Show<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_bracketed(f, values(self.0))
  }
}

impl<'a> fmt::Debug for Show<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.0 {
      Some(node) => fmt::Debug::fmt(&**node, f),
      None => f.write_str("None"),
    }
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// ListNode                                                                   //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl ListNode {
  /// A single node with no successor.

  #[inline]
  pub const fn new(val: i32) -> Self {
    ListNode { val, next: None }
  }

  /// A node followed by `next`.

  #[inline]
  pub const fn with_next(val: i32, next: Link) -> Self {
    ListNode { val, next }
  }

  /// Builds a list holding the values of `input` in order.
  ///
  /// Same as [`build`], under the name the LeetCode harness uses.

  #[must_use]
  #[allow(clippy::should_implement_trait)]
  pub fn from(input: Vec<i32>) -> Link {
    build(input)
  }

  /// Builds a list holding the values of `input` in order.

  #[must_use]
  pub fn from_slice(input: &[i32]) -> Link {
    build(input.iter().copied())
  }

  /// Iterates over the values from this node to the end of the list.

  pub fn iter(&self) -> Iter<'_> {
    Iter { next: Some(self) }
  }

  /// The number of nodes from this node to the end of the list.

  #[allow(clippy::len_without_is_empty)]
  pub fn len(&self) -> usize {
    self.iter().count()
  }
}

impl PartialEq for ListNode {
  fn eq(&self, other: &Self) -> bool {
    let mut a = self;
    let mut b = other;

    loop {
      if core::ptr::eq(a, b) {
        return true;
      }

      if a.val != b.val {
        return false;
      }

      match (&a.next, &b.next) {
        (Some(x), Some(y)) => {
          a = x;
          b = y;
        }
        (None, None) => return true,
        _ => return false,
      }
    }
  }
}

impl Clone for ListNode {
  fn clone(&self) -> Self {
    ListNode {
      val: self.val,
      next: build(self.iter().skip(1)),
    }
  }
}

impl Drop for ListNode {
  fn drop(&mut self) {
    let mut next = self.next.take();

    while let Some(mut node) = next {
      next = node.next.take();
    }
  }
}

impl fmt::Display for ListNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_bracketed(f, self.iter())
  }
}

/// Renders the nested form `ListNode(1, ListNode(2, None))`.
///
/// This is not the derived form (`ListNode { val: 1, next: Some(..) }`), so
/// `assert_eq!` failures print differently from a harness that derives
/// `Debug`.

impl fmt::Debug for ListNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // ListNode(1, ListNode(2, None))

    let mut n = 0_usize;

    for val in self.iter() {
      write!(f, "ListNode({}, ", val)?;
      n = n + 1;
    }

    f.write_str("None")?;

    for _ in 0 .. n {
      f.write_str(")")?;
    }

    Ok(())
  }
}

impl<'a> IntoIterator for &'a ListNode {
  type Item = i32;
  type IntoIter = Iter<'a>;

  fn into_iter(self) -> Iter<'a> {
    self.iter()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Iter                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a> Iterator for Iter<'a> {
  type Item = i32;

  #[inline]
  fn next(&mut self) -> Option<i32> {
    let node = self.next?;
    self.next = node.next.as_deref();
    Some(node.val)
  }
}

impl<'a> FusedIterator for Iter<'a> { }

impl<'a> fmt::Debug for Iter<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.clone()).finish()
  }
}
