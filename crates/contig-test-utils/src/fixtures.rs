//! Reusable container test fixtures.
//!
//! - [`alpha_bytes`]: `n` lowercase letters cycling `a..=z`.
//! - [`sequence`]: `0..n` as `i64`.
//! - [`DropCounter`] / [`DropTally`]: element type that records drops, for
//!   checking that moves and reallocations neither leak nor double-free.

use std::cell::Cell;
use std::rc::Rc;

/// `n` lowercase ASCII letters: `abc...zab...`.
pub fn alpha_bytes(n: usize) -> Vec<u8> {
    (0..n).map(|i| b'a' + (i % 26) as u8).collect()
}

/// The integers `0..n`.
pub fn sequence(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

/// Shared count of [`DropCounter`] drops.
#[derive(Clone, Debug, Default)]
pub struct DropTally {
    drops: Rc<Cell<usize>>,
}

impl DropTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter reporting to this tally.
    pub fn counter(&self, id: u32) -> DropCounter {
        DropCounter {
            id,
            drops: Rc::clone(&self.drops),
        }
    }

    /// Drops recorded so far.
    pub fn drops(&self) -> usize {
        self.drops.get()
    }
}

/// Element that increments its [`DropTally`] when dropped.
///
/// Clones report to the same tally, so a deep copy of N counters adds N
/// to the count when it is released.
#[derive(Debug)]
pub struct DropCounter {
    pub id: u32,
    drops: Rc<Cell<usize>>,
}

impl Clone for DropCounter {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            drops: Rc::clone(&self.drops),
        }
    }
}

impl PartialEq for DropCounter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
