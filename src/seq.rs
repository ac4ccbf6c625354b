//! Order-insensitive comparison and bracketed rendering of sequences.

use alloc::vec::Vec;
use core::fmt;

/// A sequence rendered as `[a,b,c]`.
///
/// Returned by [`show`]; the wrapped slice is never modified.

#[derive(Clone, Copy)]
pub struct Seq<'a, T>(pub &'a [T]);

/// Writes `items` as `[` followed by the items separated by `,` followed by
/// `]`. An empty sequence is written as `[]`.

pub(crate) fn write_bracketed<I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
  I: IntoIterator,
  I::Item: fmt::Display,
{
  f.write_str("[")?;

  let mut items = items.into_iter();

  if let Some(x) = items.next() {
    fmt::Display::fmt(&x, f)?;

    for x in items {
      f.write_str(",")?;
      fmt::Display::fmt(&x, f)?;
    }
  }

  f.write_str("]")
}

/// Returns whether `a` and `b` hold the same elements, ignoring order.
///
/// Both slices are sorted in place as part of the comparison, whatever the
/// result, unless their lengths differ, in which case `false` is returned
/// before either is touched. Use [`is_permutation`] to keep the original
/// order.
///
/// ```
/// let mut a = [3, 1, 2];
/// let mut b = [1, 2, 3];
/// assert!(leetkit::eq_unordered(&mut a, &mut b));
/// assert_eq!(a, [1, 2, 3]);
/// ```

pub fn eq_unordered<T: Ord>(a: &mut [T], b: &mut [T]) -> bool {
  if a.len() != b.len() {
    return false;
  }

  a.sort_unstable();
  b.sort_unstable();

  a == b
}

/// Returns whether `b` is a permutation of `a`.
///
/// Same answer as [`eq_unordered`], but sorts copies instead of the caller's
/// slices.

pub fn is_permutation<T: Ord + Clone>(a: &[T], b: &[T]) -> bool {
  if a.len() != b.len() {
    return false;
  }

  let mut a = Vec::from(a);
  let mut b = Vec::from(b);

  eq_unordered(&mut a, &mut b)
}

/// Renders a sequence as `[a,b,c]`.
///
/// ```
/// assert_eq!(leetkit::seq::show(&[1, 2, 3]).to_string(), "[1,2,3]");
/// assert_eq!(leetkit::seq::show::<u8>(&[]).to_string(), "[]");
/// ```

pub fn show<T: fmt::Display>(x: &[T]) -> Seq<'_, T> {
  Seq(x)
}

impl<'a, T: fmt::Display> fmt::Display for Seq<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_bracketed(f, self.0)
  }
}

impl<'a, T: fmt::Debug> fmt::Debug for Seq<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Seq").field(&self.0).finish()
  }
}
