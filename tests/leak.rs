// Allocation accounting for boxed lists, through a counting global allocator.
//
// The counters are per thread so that the test harness allocating on other
// threads does not disturb them.

use std::alloc::GlobalAlloc;
use std::alloc::Layout;
use std::alloc::System;
use std::cell::Cell;
use leetkit::ListNode;
use leetkit::list;

struct CountingAlloc;

thread_local! {
  static ALLOCS: Cell<usize> = const { Cell::new(0) };
  static FREES: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAlloc {
  unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
    let _ = ALLOCS.try_with(|n| n.set(n.get() + 1));
    unsafe { System.alloc(layout) }
  }

  unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
    let _ = FREES.try_with(|n| n.set(n.get() + 1));
    unsafe { System.dealloc(ptr, layout) }
  }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn counts() -> (usize, usize) {
  (ALLOCS.with(|n| n.get()), FREES.with(|n| n.get()))
}

fn measure<F: FnOnce()>(f: F) -> (usize, usize) {
  let (a0, f0) = counts();
  f();
  let (a1, f1) = counts();
  (a1 - a0, f1 - f0)
}

#[test]
fn test_build_allocates_one_block_per_node() {
  let mut l = None;
  let (allocs, frees) = measure(|| l = list::build([1, 2, 3, 4, 5]));
  assert!(allocs == 5);
  assert!(frees == 0);
  list::destroy(l);
}

#[test]
fn test_destroy_frees_every_node_once() {
  let inputs: [&[i32]; 4] = [&[], &[1], &[1, 2, 3], &[9; 1000]];
  for s in inputs {
    let (allocs, frees) = measure(|| list::destroy(ListNode::from_slice(s)));
    assert!(allocs == s.len());
    assert!(frees == s.len());
  }
}

#[test]
fn test_destroy_nothing() {
  let (allocs, frees) = measure(|| list::destroy(None));
  assert!(allocs == 0);
  assert!(frees == 0);
}

#[test]
fn test_drop_frees_every_node_once() {
  let (allocs, frees) = measure(|| drop(list::build(0 .. 10_000)));
  assert!(allocs == 10_000);
  assert!(frees == 10_000);
}

#[test]
fn test_clone_and_compare_do_not_leak() {
  let a = list::build(0 .. 100);
  let (allocs, frees) = measure(|| {
    let b = a.clone();
    assert!(a == b);
    assert!(list::eq(&a, &b));
  });
  assert!(allocs == 100);
  assert!(frees == 100);
}

#[test]
fn test_compare_and_show_of_absent_list() {
  let (allocs, frees) = measure(|| {
    assert!(list![] == list![]);
    assert!(list::show(&None).to_string() == "[]");
  });
  assert!(allocs == frees);
}
