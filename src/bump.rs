use std::ptr;

use crate::allocation::{Allocation, NO_ALLOCATION};

/// Bump state shared by the arena and fixed-buffer allocators.
///
/// The owner keeps the buffer and passes it in on every call; `Bump` only
/// tracks how many bytes from the start of that buffer are handed out. The
/// offset (rather than a pointer) keeps the state valid for inline buffers
/// that move along with their owner.
///
/// ```text
///   ┌─────┬─────┬─────┬───────────────────────────────┐
///   │ A1  │ A2  │ A3  │          remaining            │
///   └─────┴─────┴─────┴───────────────────────────────┘
///   ▲                 ▲                               ▲
///   buffer.ptr        top = ptr + used                buffer end
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Bump {
  used: usize,
}

impl Bump {
  pub const fn new() -> Self {
    Self { used: 0 }
  }

  pub fn used(&self) -> usize {
    self.used
  }

  pub fn reset(&mut self) {
    self.used = 0;
  }

  pub fn allocate(
    &mut self,
    buffer: Allocation,
    size: usize,
  ) -> Allocation {
    if buffer.is_null() {
      return NO_ALLOCATION;
    }

    let remaining = buffer.size - self.used;

    // A full buffer refuses even empty requests: a block at the buffer end
    // would not be owned.
    if remaining == 0 || size > remaining {
      return NO_ALLOCATION;
    }

    let ptr = unsafe { buffer.ptr.add(self.used) };
    self.used += size;

    Allocation::new(ptr, size)
  }

  /// Only the most recent block is reclaimed; freeing anything else is a
  /// no-op until the whole buffer goes away.
  pub fn deallocate(
    &mut self,
    buffer: Allocation,
    allocation: Allocation,
  ) {
    if self.is_tail(buffer, allocation) {
      self.used -= allocation.size;
    }
  }

  /// # Safety
  ///
  /// `allocation` must be live and produced by this bump state over `buffer`.
  pub unsafe fn reallocate(
    &mut self,
    buffer: Allocation,
    allocation: Allocation,
    new_size: usize,
  ) -> Allocation {
    if allocation.is_null() {
      return self.allocate(buffer, new_size);
    }

    if self.is_tail(buffer, allocation) {
      let offset = allocation.ptr as usize - buffer.ptr as usize;

      if new_size > buffer.size - offset {
        return NO_ALLOCATION;
      }

      self.used = offset + new_size;
      return Allocation::new(allocation.ptr, new_size);
    }

    if new_size <= allocation.size {
      return Allocation::new(allocation.ptr, new_size);
    }

    let moved = self.allocate(buffer, new_size);

    if moved.is_null() {
      return NO_ALLOCATION;
    }

    unsafe { ptr::copy_nonoverlapping(allocation.ptr, moved.ptr, allocation.size) };

    moved
  }

  /// Address-range test against `buffer`.
  pub fn owns(
    &self,
    buffer: Allocation,
    allocation: Allocation,
  ) -> bool {
    let ptr = allocation.ptr as usize;

    buffer.ptr as usize <= ptr && ptr < buffer.end()
  }

  fn is_tail(
    &self,
    buffer: Allocation,
    allocation: Allocation,
  ) -> bool {
    let base = buffer.ptr as usize;

    !allocation.is_null() && base <= allocation.ptr as usize && allocation.end() == base + self.used
  }
}
