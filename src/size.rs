//! Arena capacity.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Capacity of an [`ArenaAllocator`](crate::ArenaAllocator) in bytes.
///
/// Kept as its own type so a capacity is never mistaken for an argument
/// meant for the upstream allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArenaSize(usize);

impl ArenaSize {
  pub const fn new(bytes: usize) -> Self {
    Self(bytes)
  }

  /// Room for `count` values of `T`.
  pub const fn of<T>(count: usize) -> Self {
    Self(count * size_of::<T>())
  }

  pub const fn get(self) -> usize {
    self.0
  }
}

impl From<usize> for ArenaSize {
  fn from(bytes: usize) -> Self {
    Self(bytes)
  }
}

impl From<ArenaSize> for usize {
  fn from(size: ArenaSize) -> Self {
    size.0
  }
}

impl fmt::Display for ArenaSize {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "{} bytes", self.0)
  }
}

/// Error returned when parsing an [`ArenaSize`] from text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseArenaSizeError {
  #[error("arena size is empty")]
  Empty,
  #[error("invalid arena size number: {0:?}")]
  InvalidNumber(String),
  #[error("unknown arena size unit: {0:?}")]
  UnknownUnit(String),
  #[error("arena size {0:?} does not fit in usize")]
  Overflow(String),
}

fn unit_multiplier(unit: &str) -> Option<usize> {
  match unit.to_ascii_lowercase().as_str() {
    "" | "b" => Some(1),
    "k" | "kb" | "kib" => Some(1 << 10),
    "m" | "mb" | "mib" => Some(1 << 20),
    "g" | "gb" | "gib" => Some(1 << 30),
    _ => None,
  }
}

/// Accepts a byte count with an optional binary unit: `4096`, `64K`,
/// `64KiB`, `2 MiB`, `1g`.
impl FromStr for ArenaSize {
  type Err = ParseArenaSizeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();

    if s.is_empty() {
      return Err(ParseArenaSizeError::Empty);
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);

    if digits.is_empty() {
      return Err(ParseArenaSizeError::InvalidNumber(s.to_owned()));
    }

    let unit = unit.trim_start();
    let multiplier = unit_multiplier(unit).ok_or_else(|| ParseArenaSizeError::UnknownUnit(unit.to_owned()))?;

    let value: usize = digits
      .parse()
      .map_err(|_| ParseArenaSizeError::Overflow(s.to_owned()))?;

    value
      .checked_mul(multiplier)
      .map(Self)
      .ok_or_else(|| ParseArenaSizeError::Overflow(s.to_owned()))
  }
}
