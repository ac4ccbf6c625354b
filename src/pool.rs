//! An arena of list nodes addressed by index.
//!
//! A [`Pool`] owns the storage for every node of every list built in it. Lists
//! are handed out as [`Chain`]s, which are move-only: [`Pool::destroy`] takes
//! the chain by value, so releasing the same list twice does not compile.
//! Released nodes are kept on a free list and reused by later builds; the
//! storage itself goes back to the allocator when the pool is dropped.

use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use allocator_api2::vec::Vec;
use core::alloc::Layout;
use core::fmt;
use core::iter::FusedIterator;
use crate::AllocError;
use crate::Error;
use crate::Fail;
use crate::Link;
use crate::seq::write_bracketed;
use crate::unwrap;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// Storage for list nodes.

pub struct Pool<A: Allocator = Global> {
  entries: Vec<Entry, A>,
  free: Option<NodeId>,
  spare: usize,
}

/// A node of a [`Pool`].
///
/// An id stops being valid when its chain is destroyed, even after the slot
/// it names is reused by another chain.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId {
  index: u32,
  gen: u32,
}

/// A list held by a [`Pool`].
///
/// A chain is only meaningful for the pool that built it.

#[must_use]
#[derive(Debug)]
pub struct Chain {
  head: Option<NodeId>,
  len: usize,
}

/// An iterator over the values of a [`Chain`], head to tail.

pub struct Values<'a, A: Allocator = Global> {
  pool: &'a Pool<A>,
  next: Option<NodeId>,
  left: usize,
}

/// A [`Chain`] rendered as `[1,2,3]`.

pub struct Show<'a, A: Allocator = Global> {
  pool: &'a Pool<A>,
  chain: &'a Chain,
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

// A released entry is on the free list, threaded through `next`. `gen` is
// bumped on every release.

struct Entry {
  val: i32,
  next: Option<NodeId>,
  gen: u32,
  live: bool,
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// CONSTANTS                                                                  //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

const MAX_NODES: usize = u32::MAX as usize;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// NodeId                                                                     //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl NodeId {
  #[inline(always)]
  fn index(self) -> usize {
    self.index as usize
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Pool                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

fn reserve<A, E>(entries: &mut Vec<Entry, A>, additional: usize) -> Result<(), E>
where
  A: Allocator,
  E: Fail,
{
  if entries.capacity() - entries.len() >= additional {
    return Ok(());
  }

  let n = entries.len().saturating_add(additional);

  if n > MAX_NODES {
    return E::fail(Error::TooLarge);
  }

  if entries.try_reserve(additional).is_err() {
    return match Layout::array::<Entry>(n) {
      Ok(l) => E::fail(Error::ParentAllocatorFailed(l)),
      Err(_) => E::fail(Error::TooLarge),
    };
  }

  log::trace!("pool storage grown to {} nodes", entries.capacity());

  Ok(())
}

// Entry indices run from 0 to `MAX_NODES - 1`.

fn index<E: Fail>(len: usize) -> Result<u32, E> {
  if len >= MAX_NODES {
    return E::fail(Error::TooLarge);
  }

  Ok(len as u32)
}

fn pool<A, E>(capacity: usize, allocator: A) -> Result<Pool<A>, E>
where
  A: Allocator,
  E: Fail,
{
  let mut entries = Vec::new_in(allocator);
  reserve::<A, E>(&mut entries, capacity)?;
  Ok(Pool { entries, free: None, spare: 0 })
}

fn alloc<A, E>(pool: &mut Pool<A>, val: i32) -> Result<NodeId, E>
where
  A: Allocator,
  E: Fail,
{
  if let Some(f) = pool.free {
    let e = &mut pool.entries[f.index()];
    pool.free = e.next;
    pool.spare = pool.spare - 1;
    e.val = val;
    e.next = None;
    e.live = true;
    return Ok(NodeId { index: f.index, gen: e.gen });
  }

  // Storage may have grown past the indexable range in one amortized step.
  let index = index::<E>(pool.entries.len())?;

  reserve::<A, E>(&mut pool.entries, 1)?;

  pool.entries.push(Entry { val, next: None, gen: 0, live: true });
  Ok(NodeId { index, gen: 0 })
}

fn release<A: Allocator>(pool: &mut Pool<A>, chain: Chain) -> usize {
  let mut n = 0;
  let mut next = chain.head;

  while let Some(id) = next {
    let e = &mut pool.entries[id.index()];
    debug_assert!(e.live);
    next = e.next;
    e.live = false;
    e.gen = e.gen.wrapping_add(1);
    e.next = pool.free;
    pool.free = Some(id);
    n = n + 1;
  }

  pool.spare = pool.spare + n;
  n
}

fn build<A, E, I>(pool: &mut Pool<A>, input: I) -> Result<Chain, E>
where
  A: Allocator,
  E: Fail,
  I: IntoIterator<Item = i32>,
{
  let input = input.into_iter();
  let (lo, _) = input.size_hint();

  reserve::<A, E>(&mut pool.entries, lo.saturating_sub(pool.spare))?;

  let mut chain = Chain { head: None, len: 0 };
  let mut tail: Option<NodeId> = None;

  for val in input {
    let id =
      match alloc::<A, E>(pool, val) {
        Ok(id) => id,
        Err(e) => {
          let n = release(pool, chain);
          log::debug!("pool build failed, returned {} nodes", n);
          return Err(e);
        }
      };

    match tail {
      None => chain.head = Some(id),
      Some(t) => pool.entries[t.index()].next = Some(id),
    }

    tail = Some(id);
    chain.len = chain.len + 1;
  }

  Ok(chain)
}

impl Pool<Global> {
  /// An empty pool backed by the global allocator.

  pub fn new() -> Self {
    Self::new_in(Global)
  }

  /// A pool backed by the global allocator with room for `capacity` nodes.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory, or if `capacity` exceeds the
  /// number of nodes a pool can index.

  pub fn with_capacity(capacity: usize) -> Self {
    unwrap(pool(capacity, Global))
  }

  /// A pool backed by the global allocator with room for `capacity` nodes.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory, or if `capacity`
  /// exceeds the number of nodes a pool can index.

  pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
    pool(capacity, Global)
  }
}

impl<A: Allocator> Pool<A> {
  /// An empty pool backed by `allocator`. Nothing is allocated until the
  /// first node is built.

  pub fn new_in(allocator: A) -> Self {
    Pool { entries: Vec::new_in(allocator), free: None, spare: 0 }
  }

  /// A pool backed by `allocator` with room for `capacity` nodes.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory, or if `capacity` exceeds the
  /// number of nodes a pool can index.

  pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
    unwrap(pool(capacity, allocator))
  }

  /// A pool backed by `allocator` with room for `capacity` nodes.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory, or if `capacity`
  /// exceeds the number of nodes a pool can index.

  pub fn try_with_capacity_in(capacity: usize, allocator: A) -> Result<Self, AllocError> {
    pool(capacity, allocator)
  }

  /// Builds a list holding `input` in order. Released nodes are reused before
  /// the storage grows.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory, or if the pool would hold more
  /// nodes than it can index.

  pub fn build<I>(&mut self, input: I) -> Chain
  where
    I: IntoIterator<Item = i32>
  {
    unwrap(build(self, input))
  }

  /// Builds a list holding `input` in order.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory, or if the pool would
  /// hold more nodes than it can index. Any nodes taken before the failure
  /// are returned to the pool first.

  pub fn try_build<I>(&mut self, input: I) -> Result<Chain, AllocError>
  where
    I: IntoIterator<Item = i32>
  {
    build(self, input)
  }

  /// Returns every node of `chain` to the pool, head to tail, and reports how
  /// many there were.

  pub fn destroy(&mut self, chain: Chain) -> usize {
    let n = release(self, chain);
    log::trace!("released {} pool nodes", n);
    n
  }

  /// Structural equality of two chains of this pool.

  pub fn eq(&self, a: &Chain, b: &Chain) -> bool {
    if a.len != b.len {
      return false;
    }

    if a.head == b.head {
      return true;
    }

    self.values(a).eq(self.values(b))
  }

  /// Renders `chain` as `[1,2,3]`; an empty chain renders as `[]`.

  pub fn show<'a>(&'a self, chain: &'a Chain) -> Show<'a, A> {
    Show { pool: self, chain }
  }

  /// Iterates over the values of `chain`.

  pub fn values(&self, chain: &Chain) -> Values<'_, A> {
    Values { pool: self, next: chain.head, left: chain.len }
  }

  /// Copies `chain` out into a boxed list.

  pub fn to_list(&self, chain: &Chain) -> Link {
    crate::list::build(self.values(chain))
  }

  /// Whether `id` names a node of a chain that has not been destroyed.

  pub fn contains(&self, id: NodeId) -> bool {
    match self.entries.get(id.index()) {
      Some(e) => e.live && e.gen == id.gen,
      None => false,
    }
  }

  /// The value held by node `id`.
  ///
  /// # Panics
  ///
  /// Panics if `id` is not a live node of this pool.

  pub fn value(&self, id: NodeId) -> i32 {
    self.entry(id).val
  }

  /// A mutable reference to the value held by node `id`.
  ///
  /// # Panics
  ///
  /// Panics if `id` is not a live node of this pool.

  pub fn value_mut(&mut self, id: NodeId) -> &mut i32 {
    assert!(self.contains(id), "leetkit: node id from a destroyed chain!");
    &mut self.entries[id.index()].val
  }

  /// The successor of node `id`, if any.
  ///
  /// # Panics
  ///
  /// Panics if `id` is not a live node of this pool.

  pub fn next(&self, id: NodeId) -> Option<NodeId> {
    self.entry(id).next
  }

  fn entry(&self, id: NodeId) -> &Entry {
    assert!(self.contains(id), "leetkit: node id from a destroyed chain!");
    &self.entries[id.index()]
  }

  /// The number of nodes currently held by chains.

  pub fn live(&self) -> usize {
    self.entries.len() - self.spare
  }

  /// The number of nodes the pool can hold without growing.

  pub fn capacity(&self) -> usize {
    self.entries.capacity()
  }

  /// A reference to the parent allocator.

  pub fn allocator(&self) -> &A {
    self.entries.allocator()
  }
}

impl Default for Pool<Global> {
  fn default() -> Self {
    Self::new()
  }
}

impl<A: Allocator> fmt::Debug for Pool<A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pool")
      .field("live", &self.live())
      .field("spare", &self.spare)
      .finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Chain                                                                      //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Chain {
  /// The first node, or `None` for an empty chain.

  pub fn head(&self) -> Option<NodeId> {
    self.head
  }

  /// The number of nodes.

  pub fn len(&self) -> usize {
    self.len
  }

  /// Whether the chain has no nodes.

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Values                                                                     //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, A: Allocator> Iterator for Values<'a, A> {
  type Item = i32;

  #[inline]
  fn next(&mut self) -> Option<i32> {
    let id = self.next?;
    let e = &self.pool.entries[id.index()];
    self.next = e.next;
    self.left = self.left - 1;
    Some(e.val)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.left, Some(self.left))
  }
}

impl<'a, A: Allocator> ExactSizeIterator for Values<'a, A> { }

impl<'a, A: Allocator> FusedIterator for Values<'a, A> { }

impl<'a, A: Allocator> Clone for Values<'a, A> {
  fn clone(&self) -> Self {
    Values { pool: self.pool, next: self.next, left: self.left }
  }
}

impl<'a, A: Allocator> fmt::Debug for Values<'a, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.clone()).finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Show                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, A: Allocator> fmt::Display for Show<'a, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_bracketed(f, self.pool.values(self.chain))
  }
}

impl<'a, A: Allocator> fmt::Debug for Show<'a, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_index_limit() {
    assert!(index::<AllocError>(0) == Ok(0));
    assert!(index::<AllocError>(MAX_NODES - 1) == Ok(u32::MAX - 1));
    assert!(index::<AllocError>(MAX_NODES) == Err(AllocError));
    assert!(index::<AllocError>(MAX_NODES + 1) == Err(AllocError));
  }
}
