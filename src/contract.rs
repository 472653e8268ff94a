//! The capability traits every allocator in this crate implements.
//!
//! Composition is resolved statically: the arena, fallback and typed
//! construction helpers are generic over these traits, never over trait
//! objects.

use crate::allocation::Allocation;

/// The minimal allocator capability.
pub trait Allocator {
  /// Returns a span of at least `size` bytes, or [`NO_ALLOCATION`] when the
  /// allocator is exhausted. Never panics.
  ///
  /// [`NO_ALLOCATION`]: crate::NO_ALLOCATION
  fn allocate(
    &mut self,
    size: usize,
  ) -> Allocation;

  /// Gives an allocation back.
  ///
  /// # Safety
  ///
  /// `allocation` must have been returned by this allocator (or by a
  /// composite that routes frees to it) and must not have been freed
  /// already. The null sentinel is always accepted.
  unsafe fn deallocate(
    &mut self,
    allocation: Allocation,
  );
}

/// An allocator that can resize an allocation.
pub trait ReallocatingAllocator: Allocator {
  /// Resizes `allocation` to `new_size` bytes, possibly moving it.
  ///
  /// On success the old allocation is consumed. On failure the sentinel is
  /// returned and `allocation` is still valid and owned by the caller.
  ///
  /// # Safety
  ///
  /// Same as [`Allocator::deallocate`].
  unsafe fn reallocate(
    &mut self,
    allocation: Allocation,
    new_size: usize,
  ) -> Allocation;
}

/// An allocator that can tell whether a live allocation belongs to it.
pub trait OwnershipAware: Allocator {
  /// Returns `true` if `allocation` lies in memory this allocator hands out.
  ///
  /// Only meaningful for allocations that have not been freed yet: a freed
  /// span may alias memory that was handed out again.
  fn owns(
    &self,
    allocation: Allocation,
  ) -> bool;
}

/// An allocator without per-instance state.
///
/// Any copy behaves exactly like any other, so a shared reference to a
/// stateless allocator is itself a full allocator.
pub trait StatelessAllocator: Allocator + Default + Copy {}

impl<A: StatelessAllocator> Allocator for &A {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Allocation {
    let mut alloc = **self;
    alloc.allocate(size)
  }

  unsafe fn deallocate(
    &mut self,
    allocation: Allocation,
  ) {
    let mut alloc = **self;
    unsafe { alloc.deallocate(allocation) }
  }
}

impl<A: StatelessAllocator + ReallocatingAllocator> ReallocatingAllocator for &A {
  unsafe fn reallocate(
    &mut self,
    allocation: Allocation,
    new_size: usize,
  ) -> Allocation {
    let mut alloc = **self;
    unsafe { alloc.reallocate(allocation, new_size) }
  }
}

impl<A: StatelessAllocator + OwnershipAware> OwnershipAware for &A {
  fn owns(
    &self,
    allocation: Allocation,
  ) -> bool {
    (**self).owns(allocation)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::SystemAllocator;

  fn allocate_through<A: Allocator>(
    mut alloc: A,
    size: usize,
  ) -> Allocation {
    alloc.allocate(size)
  }

  #[test]
  fn test_shared_reference_is_allocator() {
    let system = SystemAllocator;

    let allocation = allocate_through(&system, 32);
    assert!(!allocation.is_null());
    assert!(allocation.size >= 32);

    unsafe {
      let mut shared = &system;
      let grown = shared.reallocate(allocation, 64);
      assert!(!grown.is_null());
      shared.deallocate(grown);
    }
  }
}
