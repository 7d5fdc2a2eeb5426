//! Random-access cursors over contiguous storage.
//!
//! A [`Cursor`] is a position `k` into the live elements of a buffer, with
//! `k` in `0..=len`. Position `len` is the end marker and is never
//! dereferenced. Cursors are `Copy`, carry no ownership, and borrow the
//! buffer they came from, so any mutation that could reallocate is
//! rejected by the borrow checker while a cursor is alive.
//!
//! # Caller responsibilities
//!
//! Ordering and distance compare positions only. Comparing cursors drawn
//! from different buffers is not detected and yields a meaningless answer.
//! Dereferencing the end cursor (or any position outside `0..len`) panics.
//!
//! Cursors are read-only: they yield `&T`, never `&mut T`. Writes go through
//! the buffer itself (`as_mut_slice`, `IndexMut`, `iter_mut` on the slice),
//! which the borrow checker keeps apart from any live cursor.
//!
//! A cursor is also an [`Iterator`] over the elements from its position to
//! the end, so `for x in buf.begin() + 1 { .. }` walks the tail.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, Deref, Index, Sub, SubAssign};

/// A position within a buffer's live elements.
pub struct Cursor<'a, T> {
    items: &'a [T],
    position: usize,
}

impl<'a, T> Cursor<'a, T> {
    /// Cursor at `position` within `items`.
    ///
    /// # Panics
    ///
    /// Panics if `position > items.len()`.
    pub fn new(items: &'a [T], position: usize) -> Self {
        assert!(
            position <= items.len(),
            "cursor position {position} past end {}",
            items.len()
        );
        Self { items, position }
    }

    /// Cursor at the first element.
    pub fn begin(items: &'a [T]) -> Self {
        Self { items, position: 0 }
    }

    /// The one-past-the-end cursor.
    pub fn end(items: &'a [T]) -> Self {
        Self {
            items,
            position: items.len(),
        }
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether this is the end marker.
    pub fn is_end(&self) -> bool {
        self.position >= self.items.len()
    }

    /// Element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics when the cursor is not on a live element.
    pub fn get(&self) -> &'a T {
        self.offset_get(0)
    }

    /// Element under the cursor, or `None` at the end marker.
    pub fn try_get(&self) -> Option<&'a T> {
        self.items.get(self.position)
    }

    /// Element `n` slots away: `cursor[n]` is `*(cursor + n)`.
    ///
    /// # Panics
    ///
    /// Panics when the target slot is not a live element.
    pub fn offset_get(&self, n: isize) -> &'a T {
        let target = shift(self.position, n);
        match self.items.get(target) {
            Some(item) => item,
            None => panic!(
                "dereferenced cursor at position {target} of {}",
                self.items.len()
            ),
        }
    }

    /// Prefix increment.
    pub fn inc(&mut self) -> &mut Self {
        self.position = shift(self.position, 1);
        self
    }

    /// Postfix increment: advance, returning the previous cursor.
    pub fn post_inc(&mut self) -> Self {
        let previous = *self;
        self.inc();
        previous
    }

    /// Prefix decrement.
    pub fn dec(&mut self) -> &mut Self {
        self.position = shift(self.position, -1);
        self
    }

    /// Postfix decrement: step back, returning the previous cursor.
    pub fn post_dec(&mut self) -> Self {
        let previous = *self;
        self.dec();
        previous
    }

    /// Signed distance from `origin` to `self`.
    pub fn distance_from(&self, origin: &Self) -> isize {
        self.position as isize - origin.position as isize
    }

    /// Elements from this cursor up to (not including) `end`.
    ///
    /// Returns an empty slice when `end` is not after `self`.
    pub fn slice_to(&self, end: &Self) -> &'a [T] {
        let stop = end.position.min(self.items.len());
        let start = self.position.min(stop);
        &self.items[start..stop]
    }

    /// Iterate from this cursor to the end of the buffer.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.slice_to(&Self::end(self.items)).iter()
    }
}

/// `position + n`, panicking when the result leaves `usize`.
fn shift(position: usize, n: isize) -> usize {
    match position.checked_add_signed(n) {
        Some(moved) => moved,
        None => panic!("cursor moved before start (position {position}, offset {n})"),
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> Index<isize> for Cursor<'_, T> {
    type Output = T;

    fn index(&self, n: isize) -> &T {
        self.offset_get(n)
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.position = shift(self.position, n);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        let negated = match n.checked_neg() {
            Some(negated) => negated,
            None => panic!("cursor offset {n} cannot be negated"),
        };
        self.position = shift(self.position, negated);
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    fn sub(self, origin: Cursor<'a, T>) -> isize {
        self.distance_from(&origin)
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position.cmp(&other.position)
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let item = self.items.get(self.position)?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> FusedIterator for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("len", &self.items.len())
            .finish()
    }
}
