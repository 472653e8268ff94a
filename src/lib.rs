//! # allocomp - Composable Allocators
//!
//! This crate provides a small allocator capability contract and a few
//! allocators that compose through it with static dispatch only: a system
//! heap adapter, a bump **arena** over an upstream buffer, a bump allocator
//! over an **inline fixed buffer**, and a **fallback** combinator.
//!
//! ## Overview
//!
//! Every allocator speaks in [`Allocation`] values: a pointer plus the
//! *actual* usable size. A null pointer is the "no allocation" sentinel;
//! running out of memory is never a panic or an error, just a null result
//! that travels up through every composing layer.
//!
//! ```text
//!   Capabilities:
//!
//!   ┌───────────────────────────────┐
//!   │ Allocator                     │  allocate / deallocate
//!   ├───────────────┬───────────────┤
//!   │ Reallocating  │ OwnershipAware│  reallocate / owns
//!   └───────────────┴───────────────┘
//!   StatelessAllocator: Default + Copy, usable through `&A`
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   allocomp
//!   ├── allocation - Allocation / Creation values, NO_ALLOCATION
//!   ├── contract   - Allocator, ReallocatingAllocator, OwnershipAware, StatelessAllocator
//!   ├── system     - SystemAllocator (malloc / realloc / free)
//!   ├── bump       - Bump core shared by the buffer allocators (internal)
//!   ├── arena      - ArenaAllocator over one upstream buffer
//!   ├── fixed      - FixedBufferAllocator over inline storage
//!   ├── fallback   - FallbackAllocator combinator
//!   ├── create     - create / create_with / destroy
//!   └── size       - ArenaSize and its parser
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use allocomp::{create, destroy, ArenaAllocator, ArenaSize, FallbackAllocator, SystemAllocator};
//!
//! let mut alloc = FallbackAllocator::new(
//!   ArenaAllocator::<SystemAllocator>::new(ArenaSize::of::<u64>(2)),
//!   SystemAllocator,
//! );
//!
//! let a = create(&mut alloc, 1u64);
//! let b = create(&mut alloc, 2u64);
//! let c = create(&mut alloc, 3u64); // arena is full, served by the heap
//!
//! unsafe {
//!   assert_eq!(*c.as_ref(), 3);
//!   destroy(&mut alloc, c);
//!   destroy(&mut alloc, b);
//!   destroy(&mut alloc, a);
//! }
//! ```
//!
//! ## How It Works
//!
//! The arena and the fixed-buffer allocator share one bump core:
//!
//! ```text
//!   ┌─────┬─────┬─────┬───────────────────────────────────────┐
//!   │ A1  │ A2  │ A3  │            Free Space                 │
//!   └─────┴─────┴─────┴───────────────────────────────────────┘
//!                     ▲                                       ▲
//!                    top                                 buffer end
//!
//!   allocate(n):   n > end - top  ──▶  null, top unchanged
//!                  otherwise      ──▶  {top, n}, top += n
//!   deallocate(a): a ends at top  ──▶  top = a.ptr
//!                  otherwise      ──▶  no-op (leaked until clear)
//! ```
//!
//! The fallback combinator tries its primary first and routes frees by
//! asking the primary whether it owns the block.
//!
//! ## Limitations
//!
//! - **Single-threaded only**: no allocator synchronizes internally
//! - **Tail-only reclamation**: bump allocators never reuse interior holes
//! - **No alignment negotiation**: blocks are aligned only as well as the
//!   underlying buffer and previous requests leave them; [`create`] refuses
//!   a misaligned block instead of writing to it
//!
//! ## Safety
//!
//! Allocating is safe. Freeing and resizing are `unsafe`: handing back an
//! allocation to the wrong allocator, or twice, is undefined behaviour that
//! nothing here detects.

mod allocation;
mod arena;
mod bump;
mod contract;
mod create;
mod fallback;
mod fixed;
mod size;
mod system;

pub use allocation::{Allocation, Creation, NO_ALLOCATION};
pub use arena::ArenaAllocator;
pub use contract::{Allocator, OwnershipAware, ReallocatingAllocator, StatelessAllocator};
pub use create::{create, create_with, destroy};
pub use fallback::FallbackAllocator;
pub use fixed::FixedBufferAllocator;
pub use size::{ArenaSize, ParseArenaSizeError};
pub use system::{SYSTEM, SystemAllocator};
