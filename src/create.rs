//! Typed construction on top of untyped allocation.

use std::ptr;

use crate::{allocation::Creation, contract::Allocator};

/// Moves `value` into memory from `alloc`.
///
/// Returns a null creation (and drops `value`) if the allocation fails or
/// the block handed out is not aligned for `T`.
pub fn create<T, A: Allocator>(
  alloc: &mut A,
  value: T,
) -> Creation<T> {
  create_with(alloc, || value)
}

/// Like [`create`], but only runs `make` once memory has been obtained.
pub fn create_with<T, A, F>(
  alloc: &mut A,
  make: F,
) -> Creation<T>
where
  A: Allocator,
  F: FnOnce() -> T,
{
  let allocation = alloc.allocate(size_of::<T>());

  if allocation.is_null() {
    return Creation::null();
  }

  let ptr = allocation.ptr.cast::<T>();

  if !ptr.is_aligned() {
    unsafe { alloc.deallocate(allocation) };
    return Creation::null();
  }

  unsafe { ptr.write(make()) };

  Creation {
    ptr,
    size: allocation.size,
  }
}

/// Drops the value in place and gives back the exact span recorded at
/// creation. A null creation is ignored.
///
/// # Safety
///
/// `creation` must come from [`create`] or [`create_with`] on this same
/// allocator and must not have been destroyed already.
pub unsafe fn destroy<T, A: Allocator>(
  alloc: &mut A,
  creation: Creation<T>,
) {
  if creation.is_null() {
    return;
  }

  unsafe {
    ptr::drop_in_place(creation.ptr);
    alloc.deallocate(creation.allocation());
  }
}
