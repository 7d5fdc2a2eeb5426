//! Owned heap storage with an explicit capacity.
//!
//! A [`HeapBlock`] is a single heap allocation holding `len` live elements
//! and room for `capacity` in total. It knows nothing about growth policy:
//! callers decide the next capacity and ask the block to move there. The
//! block only guarantees how the move happens:
//!
//! - the new allocation is fully built before the old one is released, so
//!   a failed `try_grow_to` leaves the block exactly as it was;
//! - `take` swaps in the empty sentinel (capacity 0, no allocation), so the
//!   source of a move owns nothing and dropping it is a no-op.

use std::mem;

use tracing::{debug, trace};

use crate::error::BufferError;

/// A single owned allocation with explicit length and capacity.
///
/// The reported [`capacity`](Self::capacity) is the capacity the owner
/// asked for, not whatever the allocator happened to round up to. That
/// keeps the containers' capacity contract (powers of two, exact
/// `reserve`) independent of allocator behaviour.
pub struct HeapBlock<T> {
    /// Live elements. Backing capacity is always `>= capacity`.
    data: Vec<T>,
    /// Logical capacity in elements.
    capacity: usize,
}

impl<T> HeapBlock<T> {
    /// The empty sentinel: no allocation, capacity 0.
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
        }
    }

    /// Allocate a block with room for `capacity` elements.
    ///
    /// Aborts via the global allocation error handler if the allocation
    /// fails.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut block = Self::empty();
        block.grow_to(capacity);
        block
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, BufferError> {
        let mut block = Self::empty();
        block.try_grow_to(capacity)?;
        Ok(block)
    }

    /// Adopt `data` as the live elements of a block of `capacity`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < data.len()`.
    pub fn from_vec(data: Vec<T>, capacity: usize) -> Self {
        assert!(
            capacity >= data.len(),
            "capacity {capacity} below length {}",
            data.len()
        );
        let mut block = Self { data, capacity: 0 };
        block.grow_to(capacity);
        block
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the block holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical capacity in elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots before the block must grow.
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// The live elements.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The live elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Move to a larger allocation of exactly `new_capacity` slots.
    ///
    /// No-op if `new_capacity <= capacity`. Live elements are moved in
    /// order. Aborts on allocation failure.
    pub fn grow_to(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity {
            return;
        }
        let old_capacity = self.capacity;
        self.data.reserve_exact(new_capacity - self.data.len());
        self.capacity = new_capacity;
        trace!(old_capacity, new_capacity, "heap block reallocated");
    }

    /// Fallible form of [`grow_to`](Self::grow_to).
    ///
    /// On error the block is left untouched: same elements, same capacity,
    /// same allocation.
    pub fn try_grow_to(&mut self, new_capacity: usize) -> Result<(), BufferError> {
        if new_capacity <= self.capacity {
            return Ok(());
        }
        let old_capacity = self.capacity;
        let additional = new_capacity - self.data.len();
        if let Err(err) = self.data.try_reserve_exact(additional) {
            debug!(old_capacity, new_capacity, %err, "heap block growth failed");
            return Err(classify_reserve_failure::<T>(new_capacity));
        }
        self.capacity = new_capacity;
        trace!(old_capacity, new_capacity, "heap block reallocated");
        Ok(())
    }

    /// Append `value` into a free slot.
    ///
    /// # Panics
    ///
    /// Panics if the block is full; callers grow first.
    pub fn push(&mut self, value: T) {
        assert!(!self.is_full(), "push into full heap block");
        self.data.push(value);
    }

    /// Construct an element in the next free slot and return it.
    ///
    /// # Panics
    ///
    /// Panics if the block is full; callers grow first.
    pub fn push_with<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        assert!(!self.is_full(), "push into full heap block");
        let index = self.data.len();
        self.data.push(make());
        &mut self.data[index]
    }

    /// Remove and return the last live element.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Drop elements past `len`, keeping the allocation.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Drop all live elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Move the contents out, leaving the empty sentinel behind.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Release the block, returning its live elements.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> HeapBlock<T> {
    /// Copy `items` into free slots.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `items.len()` slots are free.
    pub fn extend_from_slice(&mut self, items: &[T]) {
        assert!(
            items.len() <= self.remaining(),
            "extend by {} exceeds {} free slots",
            items.len(),
            self.remaining()
        );
        self.data.extend_from_slice(items);
    }
}

impl<T: Clone> Clone for HeapBlock<T> {
    /// Deep copy into a fresh allocation of the same capacity.
    fn clone(&self) -> Self {
        let mut block = Self::with_capacity(self.capacity);
        block.data.extend_from_slice(&self.data);
        block
    }
}

impl<T> Default for HeapBlock<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for HeapBlock<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeapBlock")
            .field("len", &self.data.len())
            .field("capacity", &self.capacity)
            .field("data", &self.data)
            .finish()
    }
}

/// `try_reserve_exact` does not expose its error kind on stable, so decide
/// from the layout whether the request could ever have succeeded.
fn classify_reserve_failure<T>(requested: usize) -> BufferError {
    let elem = mem::size_of::<T>().max(1);
    match requested.checked_mul(elem) {
        Some(bytes) if bytes <= isize::MAX as usize => BufferError::AllocationFailure { requested },
        _ => BufferError::CapacityOverflow,
    }
}
