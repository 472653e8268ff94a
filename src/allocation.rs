use std::{fmt, ptr};

/// A contiguous span of bytes handed out by an allocator.
///
/// A null `ptr` (with `size == 0`) is the "no allocation" sentinel. For a
/// non-null result, `size` is the *actual* usable span starting at `ptr`,
/// which may be larger than what was requested.
///
/// This is a plain value, not an owning handle: the memory belongs to the
/// allocator that produced it until the same value is passed back.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
  pub ptr: *mut u8,
  pub size: usize,
}

/// The "no allocation" sentinel.
pub const NO_ALLOCATION: Allocation = Allocation {
  ptr: ptr::null_mut(),
  size: 0,
};

impl Allocation {
  pub const fn new(
    ptr: *mut u8,
    size: usize,
  ) -> Self {
    Self { ptr, size }
  }

  pub fn is_null(&self) -> bool {
    self.ptr.is_null()
  }

  /// Address one past the last byte of the span.
  pub fn end(&self) -> usize {
    self.ptr as usize + self.size
  }
}

impl Default for Allocation {
  fn default() -> Self {
    NO_ALLOCATION
  }
}

impl fmt::Debug for Allocation {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "Allocation({:?}, {} bytes)", self.ptr, self.size)
  }
}

/// A value of type `T` constructed in place inside an allocation.
///
/// `size` is the byte span the allocator actually returned, which
/// [`destroy`](crate::destroy) hands back unchanged.
pub struct Creation<T> {
  pub ptr: *mut T,
  pub size: usize,
}

impl<T> Creation<T> {
  pub const fn null() -> Self {
    Self {
      ptr: ptr::null_mut(),
      size: 0,
    }
  }

  pub fn is_null(&self) -> bool {
    self.ptr.is_null()
  }

  /// The untyped span backing this value.
  pub fn allocation(&self) -> Allocation {
    Allocation::new(self.ptr.cast(), self.size)
  }

  /// # Safety
  ///
  /// The creation must be non-null and not yet destroyed, and no mutable
  /// reference to the value may be alive for `'a`.
  pub unsafe fn as_ref<'a>(&self) -> &'a T {
    unsafe { &*self.ptr }
  }

  /// # Safety
  ///
  /// The creation must be non-null and not yet destroyed, and no other
  /// reference to the value may be alive for `'a`.
  pub unsafe fn as_mut<'a>(&mut self) -> &'a mut T {
    unsafe { &mut *self.ptr }
  }
}

impl<T> Clone for Creation<T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Creation<T> {}

impl<T> PartialEq for Creation<T> {
  fn eq(
    &self,
    other: &Self,
  ) -> bool {
    self.ptr == other.ptr && self.size == other.size
  }
}

impl<T> Eq for Creation<T> {}

impl<T> fmt::Debug for Creation<T> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "Creation({:?}, {} bytes)", self.ptr, self.size)
  }
}
