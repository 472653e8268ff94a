use std::{cell::UnsafeCell, fmt, mem::MaybeUninit};

use crate::{
  allocation::Allocation,
  bump::Bump,
  contract::{Allocator, OwnershipAware, ReallocatingAllocator},
};

/// Inline storage whose first byte is aligned like `Align`.
#[repr(C)]
struct Storage<const N: usize, Align> {
  _align: [Align; 0],
  bytes: UnsafeCell<[MaybeUninit<u8>; N]>,
}

/// Bump allocator over an `N`-byte buffer embedded in the value itself.
///
/// There is no upstream: nothing is requested at construction and nothing is
/// released on drop. The buffer starts aligned to `align_of::<Align>()`.
///
/// Allocations point into the allocator, so it must not be moved while any
/// of them is outstanding.
pub struct FixedBufferAllocator<const N: usize, Align = u8> {
  storage: Storage<N, Align>,
  bump: Bump,
}

impl<const N: usize, Align> FixedBufferAllocator<N, Align> {
  pub const fn new() -> Self {
    Self {
      storage: Storage {
        _align: [],
        bytes: UnsafeCell::new([MaybeUninit::uninit(); N]),
      },
      bump: Bump::new(),
    }
  }

  pub const fn capacity(&self) -> usize {
    N
  }

  pub fn used(&self) -> usize {
    self.bump.used()
  }

  pub fn remaining(&self) -> usize {
    N - self.bump.used()
  }

  /// Forgets every allocation at once.
  pub fn reset(&mut self) {
    self.bump.reset();
  }

  fn buffer(&self) -> Allocation {
    Allocation::new(self.storage.bytes.get().cast(), N)
  }
}

impl<const N: usize, Align> Default for FixedBufferAllocator<N, Align> {
  fn default() -> Self {
    Self::new()
  }
}

impl<const N: usize, Align> fmt::Debug for FixedBufferAllocator<N, Align> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_struct("FixedBufferAllocator")
      .field("capacity", &N)
      .field("used", &self.bump.used())
      .finish()
  }
}

impl<const N: usize, Align> Allocator for FixedBufferAllocator<N, Align> {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Allocation {
    let buffer = self.buffer();
    self.bump.allocate(buffer, size)
  }

  unsafe fn deallocate(
    &mut self,
    allocation: Allocation,
  ) {
    let buffer = self.buffer();
    self.bump.deallocate(buffer, allocation)
  }
}

impl<const N: usize, Align> ReallocatingAllocator for FixedBufferAllocator<N, Align> {
  unsafe fn reallocate(
    &mut self,
    allocation: Allocation,
    new_size: usize,
  ) -> Allocation {
    let buffer = self.buffer();
    unsafe { self.bump.reallocate(buffer, allocation, new_size) }
  }
}

impl<const N: usize, Align> OwnershipAware for FixedBufferAllocator<N, Align> {
  fn owns(
    &self,
    allocation: Allocation,
  ) -> bool {
    self.bump.owns(self.buffer(), allocation)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::NO_ALLOCATION;

  #[test]
  fn test_alloc() {
    let mut alloc = FixedBufferAllocator::<16>::new();

    let first = alloc.allocate(10);
    assert!(!first.is_null());
    assert!(alloc.allocate(7).is_null());

    let second = alloc.allocate(6);
    assert_eq!(second.ptr, unsafe { first.ptr.add(10) });
    assert_eq!(alloc.remaining(), 0);

    unsafe { alloc.deallocate(second) };
    assert_eq!(alloc.used(), 10);

    alloc.reset();
    assert_eq!(alloc.allocate(16).ptr, first.ptr);
  }

  #[test]
  fn test_owns() {
    let mut alloc = FixedBufferAllocator::<8>::new();
    let mut other = FixedBufferAllocator::<8>::new();

    let mine = alloc.allocate(8);
    let theirs = other.allocate(8);

    assert!(alloc.owns(mine));
    assert!(!alloc.owns(theirs));
    assert!(!alloc.owns(NO_ALLOCATION));
  }

  #[test]
  fn test_start_alignment() {
    let mut alloc = FixedBufferAllocator::<64, u64>::new();
    let first = alloc.allocate(1);

    assert_eq!(first.ptr as usize % align_of::<u64>(), 0);
    assert!(size_of::<FixedBufferAllocator<64, u64>>() >= 64);
  }

  #[test]
  fn test_zero_capacity() {
    let mut alloc = FixedBufferAllocator::<0>::new();

    assert!(alloc.allocate(1).is_null());

    // Nothing to hand out, not even an empty block.
    assert!(alloc.allocate(0).is_null());
  }
}
