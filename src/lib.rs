#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use core::alloc::Layout;
use core::fmt;

/// The error returned by the fallible `try_` operations when memory could not
/// be obtained for new list nodes.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

pub mod list;

pub mod pool;

pub mod seq;

pub use list::Link;
pub use list::ListNode;
pub use pool::Chain;
pub use pool::NodeId;
pub use pool::Pool;
pub use seq::Seq;
pub use seq::eq_unordered;
pub use seq::is_permutation;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

enum Error {
  ParentAllocatorFailed(Layout),
  TooLarge,
}

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(_: Error) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(e: Error) -> Result<T, Self> {
    match e {
      Error::ParentAllocatorFailed(layout) =>
        alloc::alloc::handle_alloc_error(layout),
      Error::TooLarge =>
        // A pool addresses its nodes with 32-bit indices.
        panic!("leetkit: attempted to hold more nodes than a pool can index!"),
    }
  }
}

impl Fail for AllocError {
  #[inline(always)]
  fn fail<T>(_: Error) -> Result<T, Self> {
    Err(AllocError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// AllocError                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for AllocError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("memory allocation failed")
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// MACROS                                                                     //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// Builds a [`Link`] from a list of values, in order.
///
/// `list![]` is `None`.
///
/// ```
/// let l = leetkit::list![1, 2, 3];
/// assert_eq!(leetkit::list::show(&l).to_string(), "[1,2,3]");
/// ```

#[macro_export]
macro_rules! list {
  () => {
    $crate::list::build(::core::iter::empty())
  };
  ($($x:expr),+ $(,)?) => {
    $crate::list::build([$($x),+])
  };
}
