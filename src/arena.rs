use std::mem;

use tracing::debug;

use crate::{
  allocation::{Allocation, NO_ALLOCATION},
  bump::Bump,
  contract::{Allocator, OwnershipAware, ReallocatingAllocator},
  size::ArenaSize,
};

/// Bump allocator over one buffer obtained from an upstream allocator.
///
/// The buffer is requested once, at construction, with exactly the configured
/// capacity. It is handed back upstream by [`clear`](Self::clear) or on drop.
///
/// ```text
///   upstream ──allocate(capacity)──▶ ┌────┬────┬──────────────────┐
///                                    │ A1 │ A2 │      free        │
///   upstream ◀──deallocate(buffer)── └────┴────┴──────────────────┘
///                                              ▲
///                                             top
/// ```
///
/// If the upstream request fails the arena is empty and every allocation
/// fails until it is rebuilt.
pub struct ArenaAllocator<A: Allocator> {
  upstream: A,
  /// What upstream returned; may be larger than `capacity`.
  buffer: Allocation,
  capacity: usize,
  bump: Bump,
}

impl<A: Allocator> ArenaAllocator<A> {
  /// Builds an arena over a default-constructed upstream allocator.
  pub fn new(size: ArenaSize) -> Self
  where
    A: Default,
  {
    Self::with_upstream(size, A::default())
  }

  pub fn with_upstream(
    size: ArenaSize,
    mut upstream: A,
  ) -> Self {
    let buffer = upstream.allocate(size.get());

    if buffer.is_null() {
      debug!(capacity = size.get(), "arena upstream allocation failed");
      return Self::empty(upstream);
    }

    debug!(
      capacity = size.get(),
      usable = buffer.size,
      address = ?buffer.ptr,
      "arena buffer obtained"
    );

    Self {
      upstream,
      buffer,
      capacity: size.get().min(buffer.size),
      bump: Bump::new(),
    }
  }

  fn empty(upstream: A) -> Self {
    Self {
      upstream,
      buffer: NO_ALLOCATION,
      capacity: 0,
      bump: Bump::new(),
    }
  }

  /// Releases the buffer upstream. Every outstanding allocation becomes
  /// invalid. Calling it on an empty arena does nothing.
  pub fn clear(&mut self) {
    if !self.buffer.is_null() {
      debug!(address = ?self.buffer.ptr, usable = self.buffer.size, "arena buffer released");
      unsafe { self.upstream.deallocate(self.buffer) };
    }

    self.buffer = NO_ALLOCATION;
    self.capacity = 0;
    self.bump.reset();
  }

  /// Moves the buffer out into a new arena, leaving `self` empty.
  pub fn take(&mut self) -> Self
  where
    A: Default,
  {
    mem::replace(self, Self::empty(A::default()))
  }

  /// Bytes available in total.
  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn used(&self) -> usize {
    self.bump.used()
  }

  pub fn remaining(&self) -> usize {
    self.capacity - self.bump.used()
  }

  pub fn upstream(&self) -> &A {
    &self.upstream
  }

  fn region(&self) -> Allocation {
    Allocation::new(self.buffer.ptr, self.capacity)
  }
}

impl<A: Allocator + Default> Default for ArenaAllocator<A> {
  fn default() -> Self {
    Self::empty(A::default())
  }
}

impl<A: Allocator> Drop for ArenaAllocator<A> {
  fn drop(&mut self) {
    self.clear();
  }
}

impl<A: Allocator> Allocator for ArenaAllocator<A> {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Allocation {
    let region = self.region();
    self.bump.allocate(region, size)
  }

  unsafe fn deallocate(
    &mut self,
    allocation: Allocation,
  ) {
    let region = self.region();
    self.bump.deallocate(region, allocation)
  }
}

impl<A: Allocator> ReallocatingAllocator for ArenaAllocator<A> {
  unsafe fn reallocate(
    &mut self,
    allocation: Allocation,
    new_size: usize,
  ) -> Allocation {
    let region = self.region();
    unsafe { self.bump.reallocate(region, allocation, new_size) }
  }
}

impl<A: Allocator> OwnershipAware for ArenaAllocator<A> {
  fn owns(
    &self,
    allocation: Allocation,
  ) -> bool {
    self.bump.owns(self.region(), allocation)
  }
}
