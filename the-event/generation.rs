//! Sequence guard for results that arrive after the state they were
//! computed from has moved on.
//!
//! Language detection may finish after the user typed again; a result is
//! applied only while its generation is still the current one.

use std::sync::atomic::{
  AtomicU64,
  Ordering,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
  pub const fn get(self) -> u64 {
    self.0
  }
}

#[derive(Debug, Default)]
pub struct GenerationCounter {
  current: AtomicU64,
}

impl GenerationCounter {
  pub const fn new() -> Self {
    Self {
      current: AtomicU64::new(0),
    }
  }

  pub fn current(&self) -> Generation {
    Generation(self.current.load(Ordering::Acquire))
  }

  /// Invalidates every generation handed out so far and returns the new one.
  pub fn advance(&self) -> Generation {
    Generation(self.current.fetch_add(1, Ordering::AcqRel) + 1)
  }

  pub fn is_current(&self, generation: Generation) -> bool {
    self.current() == generation
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn advance_invalidates_older_generations() {
    let counter = GenerationCounter::new();
    let first = counter.advance();
    assert!(counter.is_current(first));

    let second = counter.advance();
    assert!(second > first);
    assert!(!counter.is_current(first));
    assert!(counter.is_current(second));
    assert_eq!(counter.current().get(), 2);
  }
}
