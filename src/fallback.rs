use tracing::trace;

use crate::{
  allocation::Allocation,
  contract::{Allocator, OwnershipAware, ReallocatingAllocator, StatelessAllocator},
};

/// Serves requests from `primary` until it is exhausted, then from
/// `fallback`.
///
/// ```text
///                       ┌──────────┐  null   ┌──────────┐
///   allocate(size) ───▶ │ primary  │ ──────▶ │ fallback │
///                       └──────────┘         └──────────┘
///                            ▲                    ▲
///   deallocate(a) ── primary.owns(a)? ── yes ─┘   └── no
/// ```
///
/// Frees are routed by `primary.owns`, so the fallback only ever sees
/// allocations it produced itself and does not have to be ownership-aware.
///
/// The composite is stateless (and `Copy`) when both halves are.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackAllocator<P, F> {
  primary: P,
  fallback: F,
}

impl<P, F> FallbackAllocator<P, F> {
  pub const fn new(
    primary: P,
    fallback: F,
  ) -> Self {
    Self { primary, fallback }
  }

  pub fn primary(&self) -> &P {
    &self.primary
  }

  pub fn primary_mut(&mut self) -> &mut P {
    &mut self.primary
  }

  pub fn fallback(&self) -> &F {
    &self.fallback
  }

  pub fn fallback_mut(&mut self) -> &mut F {
    &mut self.fallback
  }

  pub fn into_parts(self) -> (P, F) {
    (self.primary, self.fallback)
  }
}

impl<P: OwnershipAware, F: Allocator> Allocator for FallbackAllocator<P, F> {
  fn allocate(
    &mut self,
    size: usize,
  ) -> Allocation {
    let allocation = self.primary.allocate(size);

    if !allocation.is_null() {
      return allocation;
    }

    trace!(size, "primary exhausted, using fallback");
    self.fallback.allocate(size)
  }

  unsafe fn deallocate(
    &mut self,
    allocation: Allocation,
  ) {
    unsafe {
      if self.primary.owns(allocation) {
        self.primary.deallocate(allocation);
      } else {
        self.fallback.deallocate(allocation);
      }
    }
  }
}

impl<P, F> ReallocatingAllocator for FallbackAllocator<P, F>
where
  P: OwnershipAware + ReallocatingAllocator,
  F: ReallocatingAllocator,
{
  unsafe fn reallocate(
    &mut self,
    allocation: Allocation,
    new_size: usize,
  ) -> Allocation {
    unsafe {
      if self.primary.owns(allocation) {
        self.primary.reallocate(allocation, new_size)
      } else {
        self.fallback.reallocate(allocation, new_size)
      }
    }
  }
}

impl<P: OwnershipAware, F: OwnershipAware> OwnershipAware for FallbackAllocator<P, F> {
  fn owns(
    &self,
    allocation: Allocation,
  ) -> bool {
    self.primary.owns(allocation) || self.fallback.owns(allocation)
  }
}

impl<P, F> StatelessAllocator for FallbackAllocator<P, F>
where
  P: StatelessAllocator + OwnershipAware,
  F: StatelessAllocator,
{
}
