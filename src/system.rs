use libc::{c_void, free, malloc, realloc};

use crate::{
  allocation::{Allocation, NO_ALLOCATION},
  contract::{Allocator, ReallocatingAllocator, StatelessAllocator},
};

/// Allocator backed by the C heap (`malloc`, `realloc`, `free`).
///
/// Reports the real usable size of every block, which is often larger than
/// the request; callers may use the surplus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemAllocator;

/// Ready-made instance, usable through a shared reference.
pub const SYSTEM: SystemAllocator = SystemAllocator;

#[cfg(target_os = "linux")]
unsafe fn usable_size(
  ptr: *mut c_void,
  _requested: usize,
) -> usize {
  unsafe { libc::malloc_usable_size(ptr) }
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
unsafe fn usable_size(
  ptr: *mut c_void,
  _requested: usize,
) -> usize {
  unsafe { libc::malloc_size(ptr) }
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "ios")))]
unsafe fn usable_size(
  _ptr: *mut c_void,
  requested: usize,
) -> usize {
  requested
}

unsafe fn to_allocation(
  ptr: *mut c_void,
  requested: usize,
) -> Allocation {
  if ptr.is_null() {
    return NO_ALLOCATION;
  }

  Allocation::new(ptr.cast(), unsafe { usable_size(ptr, requested) })
}

impl Allocator for SystemAllocator {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Allocation {
    unsafe { to_allocation(malloc(size), size) }
  }

  unsafe fn deallocate(
    &mut self,
    allocation: Allocation,
  ) {
    unsafe { free(allocation.ptr.cast()) }
  }
}

impl ReallocatingAllocator for SystemAllocator {
  unsafe fn reallocate(
    &mut self,
    allocation: Allocation,
    new_size: usize,
  ) -> Allocation {
    // `realloc(p, 0)` may free `p` and return null, which would look like a
    // failure that left `p` alive.
    let new_size = new_size.max(1);
    unsafe { to_allocation(realloc(allocation.ptr.cast(), new_size), new_size) }
  }
}

impl StatelessAllocator for SystemAllocator {}
