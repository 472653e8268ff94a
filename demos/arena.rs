use std::env;

use allocomp::{
  Allocation, Allocator, ArenaAllocator, ArenaSize, FallbackAllocator, FixedBufferAllocator, OwnershipAware,
  ParseArenaSizeError, ReallocatingAllocator, SystemAllocator, create, destroy,
};

fn print_alloc(
  label: &str,
  allocation: Allocation,
) {
  println!("[{}] {} bytes @ {:?}", label, allocation.size, allocation.ptr);
}

/// Usage: `cargo run --example arena -- [capacity]`, e.g. `64`, `4K`, `1MiB`.
fn main() -> Result<(), ParseArenaSizeError> {
  let capacity: ArenaSize = env::args().nth(1).as_deref().unwrap_or("64").parse()?;

  // --------------------------------------------------------------------
  // 1) The system allocator reports the usable size, not the request.
  // --------------------------------------------------------------------
  let mut system = SystemAllocator;
  let one = system.allocate(1);
  print_alloc("1: system allocate(1)", one);

  unsafe {
    let resized = system.reallocate(one, 4100);
    print_alloc("1: system reallocate(4100)", resized);
    system.deallocate(resized);
  }

  // --------------------------------------------------------------------
  // 2) An arena takes one buffer of exactly `capacity` bytes upstream and
  //    bumps through it.
  // --------------------------------------------------------------------
  let mut arena = ArenaAllocator::<SystemAllocator>::new(capacity);
  println!("\n[2] arena capacity = {}", arena.capacity());

  let mut count = 0;
  loop {
    let creation = create(&mut arena, count as u64);
    if creation.is_null() {
      break;
    }
    count += 1;
  }
  println!("[2] fitted {} u64 values, {} bytes left", count, arena.remaining());

  // --------------------------------------------------------------------
  // 3) Only the most recent block can be reclaimed.
  // --------------------------------------------------------------------
  arena.clear();
  arena = ArenaAllocator::new(capacity);

  let first = arena.allocate(8);
  let second = arena.allocate(8);
  unsafe { arena.deallocate(first) };
  println!("\n[3] freed first block, used = {}", arena.used());
  unsafe { arena.deallocate(second) };
  println!("[3] freed tail block,  used = {}", arena.used());

  // --------------------------------------------------------------------
  // 4) A fixed inline buffer in front of the heap.
  // --------------------------------------------------------------------
  let mut alloc = FallbackAllocator::new(FixedBufferAllocator::<32, u64>::new(), SystemAllocator);

  let values: Vec<_> = (0..6u64).map(|i| create(&mut alloc, i)).collect();
  for (i, value) in values.iter().enumerate() {
    let on_stack = alloc.primary().owns(value.allocation());
    println!(
      "[4] value {} @ {:?} served by {}",
      i,
      value.ptr,
      if on_stack { "fixed buffer" } else { "system heap" }
    );
  }

  for value in values.into_iter().rev() {
    unsafe { destroy(&mut alloc, value) };
  }
  println!("[4] fixed buffer used after destroy = {}", alloc.primary().used());

  Ok(())
}
