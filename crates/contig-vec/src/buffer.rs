//! The growable contiguous sequence.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};

use contig_core::{grown_capacity, next_capacity, BufferConfig, BufferError, Cursor, HeapBlock};

use crate::render::Rendered;

/// A growable, always-heap, contiguous sequence of `T`.
///
/// # Invariants
///
/// - `len() <= capacity()`.
/// - Storage is allocated whenever `capacity() > 0`.
/// - A moved-from buffer (see [`take`](Self::take)) has length 0,
///   capacity 0 and owns no allocation.
///
/// Copy is [`Clone`]: a deep copy with the same capacity. Move is
/// [`take`](Self::take) / [`assign_from`](Self::assign_from), or a plain
/// Rust move when the source is not needed afterwards.
pub struct ContiguousBuffer<T> {
    block: HeapBlock<T>,
}

impl<T> ContiguousBuffer<T> {
    /// Empty buffer with one slot allocated.
    pub fn new() -> Self {
        Self {
            block: HeapBlock::with_capacity(BufferConfig::DEFAULT_CAPACITY),
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.block.len()
    }

    /// Number of slots allocated.
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    /// Append `value`, doubling capacity first if the buffer is full.
    ///
    /// Amortised O(1). Aborts if the allocator cannot satisfy the growth.
    pub fn push(&mut self, value: T) {
        if self.block.is_full() {
            self.block.grow_to(grown_capacity(self.block.capacity()));
        }
        self.block.push(value);
    }

    /// Append `value`, reporting allocation failure instead of aborting.
    ///
    /// On error the buffer keeps its previous contents and capacity and
    /// `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), BufferError> {
        if self.block.is_full() {
            self.block.try_grow_to(grown_capacity(self.block.capacity()))?;
        }
        self.block.push(value);
        Ok(())
    }

    /// Construct a new last element in place and return a reference to it.
    ///
    /// Follows the same growth rule as [`push`](Self::push).
    pub fn emplace_back<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if self.block.is_full() {
            self.block.grow_to(grown_capacity(self.block.capacity()));
        }
        self.block.push_with(make)
    }

    /// Grow capacity to exactly `capacity` if it is larger than the
    /// current one. Never shrinks.
    pub fn reserve(&mut self, capacity: usize) {
        self.block.grow_to(capacity);
    }

    /// Fallible form of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), BufferError> {
        self.block.try_grow_to(capacity)
    }

    /// Drop every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.block.clear();
    }

    /// Bounds-checked shared access.
    pub fn at(&self, index: usize) -> Result<&T, BufferError> {
        let len = self.len();
        self.block
            .as_slice()
            .get(index)
            .ok_or(BufferError::out_of_range(index, len))
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, BufferError> {
        let len = self.len();
        self.block
            .as_mut_slice()
            .get_mut(index)
            .ok_or(BufferError::out_of_range(index, len))
    }

    /// The live elements.
    pub fn as_slice(&self) -> &[T] {
        self.block.as_slice()
    }

    /// The live elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.block.as_mut_slice()
    }

    /// Cursor at the first element.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::begin(self.as_slice())
    }

    /// One-past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::end(self.as_slice())
    }

    /// Move the contents out, leaving this buffer empty with capacity 0.
    pub fn take(&mut self) -> Self {
        Self {
            block: self.block.take(),
        }
    }

    /// Move-assign: release this buffer's storage and adopt `source`'s,
    /// leaving `source` empty with capacity 0.
    pub fn assign_from(&mut self, source: &mut Self) -> &mut Self {
        self.block = source.block.take();
        self
    }

    /// Release the buffer, returning its elements as a `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        self.block.into_vec()
    }
}

impl<T: Default> ContiguousBuffer<T> {
    /// Buffer of `len` default elements with capacity `next_capacity(len)`.
    ///
    /// `with_len(0)` yields the zero-capacity state; the first push
    /// allocates one slot.
    pub fn with_len(len: usize) -> Self {
        let mut block = HeapBlock::with_capacity(next_capacity(len));
        for _ in 0..len {
            block.push(T::default());
        }
        Self { block }
    }
}

impl<T: Clone> ContiguousBuffer<T> {
    /// Copy `items` into a buffer of capacity `next_capacity(items.len())`.
    ///
    /// An empty slice yields the same state as [`new`](Self::new).
    pub fn from_slice(items: &[T]) -> Self {
        if items.is_empty() {
            return Self::new();
        }
        let mut block = HeapBlock::with_capacity(next_capacity(items.len()));
        block.extend_from_slice(items);
        Self { block }
    }

    /// Copy-assign: replace the contents with a deep copy of `source`.
    pub fn copy_from(&mut self, source: &Self) -> &mut Self {
        self.clone_from(source);
        self
    }
}

impl<T> Default for ContiguousBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ContiguousBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            block: self.block.clone(),
        }
    }
}

impl<T> From<Vec<T>> for ContiguousBuffer<T> {
    fn from(items: Vec<T>) -> Self {
        let capacity = next_capacity(items.len()).max(BufferConfig::DEFAULT_CAPACITY);
        Self {
            block: HeapBlock::from_vec(items, capacity),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for ContiguousBuffer<T> {
    fn from(items: [T; N]) -> Self {
        Vec::from(items).into()
    }
}

impl<T: Clone> From<&[T]> for ContiguousBuffer<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T> FromIterator<T> for ContiguousBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<T> Extend<T> for ContiguousBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> Deref for ContiguousBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for ContiguousBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for ContiguousBuffer<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics with the [`BufferError::OutOfRange`] message when
    /// `index >= len()`. Use [`at`](ContiguousBuffer::at) to handle it.
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for ContiguousBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a ContiguousBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ContiguousBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> IntoIterator for ContiguousBuffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<T: PartialEq> PartialEq for ContiguousBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ContiguousBuffer<T> {}

impl<T: PartialEq> PartialEq<[T]> for ContiguousBuffer<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for ContiguousBuffer<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for ContiguousBuffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for ContiguousBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ContiguousBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Rendered(self.as_slice()), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_one_slot() {
        let vec: ContiguousBuffer<i32> = ContiguousBuffer::new();
        assert_eq!(vec.len(), 0);
        assert_eq!(vec.capacity(), 1);
        assert!(vec.is_empty());
    }

    #[test]
    fn push_doubles_capacity() {
        let mut vec = ContiguousBuffer::new();
        let mut capacities = Vec::new();
        for x in 1..=5 {
            vec.push(x);
            capacities.push(vec.capacity());
        }
        assert_eq!(capacities, [1, 2, 4, 4, 8]);
        assert_eq!(vec, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn with_len_default_constructs() {
        let vec: ContiguousBuffer<u8> = ContiguousBuffer::with_len(5);
        assert_eq!(vec.len(), 5);
        assert_eq!(vec.capacity(), 8);
        assert!(vec.iter().all(|&b| b == 0));
    }

    #[test]
    fn with_len_zero_is_unallocated() {
        let mut vec: ContiguousBuffer<u8> = ContiguousBuffer::with_len(0);
        assert_eq!(vec.capacity(), 0);
        vec.push(1);
        assert_eq!(vec.capacity(), 1);
    }

    #[test]
    fn from_sequence_rounds_capacity() {
        let vec = ContiguousBuffer::from([3, 4, 5, 6, 7]);
        assert_eq!(vec.len(), 5);
        assert_eq!(vec.capacity(), 8);
        assert_eq!(vec[3], 6);

        let empty: ContiguousBuffer<i32> = ContiguousBuffer::from_slice(&[]);
        assert_eq!(empty.capacity(), 1);
    }

    #[test]
    fn emplace_back_constructs_in_slot() {
        let mut vec: ContiguousBuffer<(u32, String)> = ContiguousBuffer::new();
        vec.emplace_back(|| (1, "one".into()));
        let last = vec.emplace_back(|| (2, "two".into()));
        last.1.push('!');
        assert_eq!(vec.len(), 2);
        assert_eq!(vec.capacity(), 2);
        assert_eq!(vec[1], (2, "two!".to_string()));
    }

    #[test]
    fn reserve_is_exact_and_monotonic() {
        let mut vec = ContiguousBuffer::from([1, 2, 3]);
        vec.reserve(2);
        assert_eq!(vec.capacity(), 4);
        vec.reserve(100);
        assert_eq!(vec.capacity(), 100);
        assert_eq!(vec, [1, 2, 3]);
    }

    #[test]
    fn at_reports_out_of_range() {
        let vec = ContiguousBuffer::from([1, 2]);
        assert_eq!(vec.at(1), Ok(&2));
        assert_eq!(vec.at(2), Err(BufferError::out_of_range(2, 2)));
    }

    #[test]
    #[should_panic(expected = "index 2 out of range for length 2")]
    fn index_past_end_panics() {
        let vec = ContiguousBuffer::from([1, 2]);
        let _ = vec[2];
    }

    #[test]
    fn take_resets_source() {
        let mut source = ContiguousBuffer::from([1, 2, 3]);
        let moved = source.take();
        assert_eq!(moved, [1, 2, 3]);
        assert_eq!(moved.capacity(), 4);
        assert_eq!(source.len(), 0);
        assert_eq!(source.capacity(), 0);
        assert_eq!(source.to_string(), "{ }");
    }

    #[test]
    fn moved_from_buffer_is_reusable() {
        let mut source = ContiguousBuffer::from([1]);
        let _moved = source.take();
        source.push(9);
        assert_eq!(source, [9]);
        assert_eq!(source.capacity(), 1);
    }

    #[test]
    fn assign_from_moves_storage() {
        let mut dest = ContiguousBuffer::from(["a"]);
        let mut source = ContiguousBuffer::from(["x", "y", "z"]);
        dest.assign_from(&mut source).push("w");
        assert_eq!(dest, ["x", "y", "z", "w"]);
        assert!(source.is_empty());
        assert_eq!(source.capacity(), 0);
    }

    #[test]
    fn copy_from_returns_assigned_instance() {
        let source = ContiguousBuffer::from([4, 5]);
        let mut dest = ContiguousBuffer::new();
        assert_eq!(dest.copy_from(&source).len(), 2);
        dest[0] = 40;
        assert_eq!(source, [4, 5]);
        assert_eq!(dest, [40, 5]);
    }

    #[test]
    fn try_push_reports_overflow_without_mutation() {
        let mut vec: ContiguousBuffer<u64> = ContiguousBuffer::from([1]);
        assert_eq!(
            vec.try_reserve(usize::MAX),
            Err(BufferError::CapacityOverflow)
        );
        assert_eq!(vec.capacity(), 1);
        assert!(vec.try_push(2).is_ok());
        assert_eq!(vec, [1, 2]);
    }

    #[test]
    fn cursor_walk_matches_indexing() {
        let vec = ContiguousBuffer::from([10, 20, 30]);
        let begin = vec.begin();
        assert_eq!(vec.end() - begin, 3);
        for n in 0..3 {
            assert_eq!(*(begin + n as isize), vec[n]);
        }
    }

    #[test]
    fn display_renders_braced_list() {
        let vec = ContiguousBuffer::from([3, 4, 5, 6, 7]);
        assert_eq!(vec.to_string(), "{ 3 4 5 6 7 }");
        assert_eq!(format!("{vec:?}"), "[3, 4, 5, 6, 7]");
    }

    #[test]
    fn collect_and_extend() {
        let mut vec: ContiguousBuffer<u32> = (1..=3).collect();
        assert_eq!(vec.capacity(), 4);
        vec.extend(4..=6);
        assert_eq!(vec.capacity(), 8);
        assert_eq!(vec.into_iter().sum::<u32>(), 21);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pushing_n_gives_next_power_of_two(
                items in proptest::collection::vec(any::<i64>(), 1..300),
            ) {
                let mut vec = ContiguousBuffer::new();
                for &x in &items {
                    vec.push(x);
                }
                prop_assert_eq!(vec.len(), items.len());
                prop_assert_eq!(vec.capacity(), items.len().next_power_of_two());
                prop_assert_eq!(vec.as_slice(), items.as_slice());

                let built = ContiguousBuffer::from_slice(&items);
                prop_assert_eq!(built.capacity(), vec.capacity());
            }

            #[test]
            fn reserve_preserves_contents(
                items in proptest::collection::vec(any::<u8>(), 0..64),
                extra in 0usize..256,
            ) {
                let mut vec = ContiguousBuffer::from_slice(&items);
                let before = vec.capacity();
                let requested = before + extra;
                vec.reserve(requested);
                prop_assert_eq!(vec.capacity(), requested.max(before));
                prop_assert_eq!(vec.as_slice(), items.as_slice());
            }
        }
    }
}
