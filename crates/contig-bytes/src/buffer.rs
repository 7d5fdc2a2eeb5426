//! The small-buffer-optimised byte buffer.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ffi::CStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{AddAssign, Deref, DerefMut, Index, IndexMut};

use contig_core::{grown_capacity, BufferConfig, BufferError, Cursor};

use crate::repr::Repr;

/// A byte sequence that stores up to 15 bytes inline and spills longer
/// content to the heap.
///
/// The byte at index `len()` is always a terminator (`0`), so
/// [`as_bytes_with_nul`](Self::as_bytes_with_nul) and
/// [`c_str`](Self::c_str) are available without copying. Content is a
/// plain byte sequence: no UTF-8 validation, no codepoint awareness.
///
/// Once an instance spills to the heap it stays there, even if it is
/// cleared or truncated. Copies ([`Clone`]) are freshly sized and go back
/// inline when the content fits. A [`take`](Self::take) transfers heap
/// storage without copying and leaves the source empty and inline.
pub struct HybridByteBuffer {
    repr: Repr,
}

impl HybridByteBuffer {
    /// Inline capacity, in bytes.
    pub const INLINE_CAPACITY: usize = BufferConfig::INLINE_CAPACITY;

    /// Empty inline buffer.
    pub const fn new() -> Self {
        Self {
            repr: Repr::empty(),
        }
    }

    /// Copy `bytes` into a freshly sized buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            repr: Repr::from_bytes(bytes),
        }
    }

    /// Buffer of `count` copies of `byte`.
    pub fn with_fill(count: usize, byte: u8) -> Self {
        let mut buffer = Self::new();
        buffer.repr.grow_to(count);
        for _ in 0..count {
            buffer.repr.push(byte);
        }
        buffer
    }

    /// Number of content bytes.
    pub fn len(&self) -> usize {
        self.repr.len()
    }

    /// Content bytes that fit before the next reallocation.
    ///
    /// Always 15 while inline.
    pub fn capacity(&self) -> usize {
        self.repr.capacity()
    }

    /// Whether the buffer has no content.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the content lives in the inline area.
    pub fn is_inline(&self) -> bool {
        self.repr.is_inline()
    }

    /// Content bytes, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        self.repr.as_bytes()
    }

    /// Content bytes, mutably. The terminator is not reachable.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        self.repr.as_mut_bytes()
    }

    /// Content bytes followed by the terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        self.repr.as_bytes_with_nul()
    }

    /// NUL-terminated view, as a C reader would see it.
    ///
    /// If the content contains a `0` byte the view ends there.
    pub fn c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(self.as_bytes_with_nul()).unwrap_or_default()
    }

    /// Append one byte, doubling capacity if the buffer is full.
    pub fn push(&mut self, byte: u8) {
        if self.len() == self.capacity() {
            self.repr.grow_to(grown_capacity(self.capacity()));
        }
        self.repr.push(byte);
    }

    /// Fallible form of [`push`](Self::push).
    pub fn try_push(&mut self, byte: u8) -> Result<(), BufferError> {
        if self.len() == self.capacity() {
            self.repr.try_grow_to(grown_capacity(self.capacity()))?;
        }
        self.repr.push(byte);
        Ok(())
    }

    /// Remove and return the last byte.
    pub fn pop(&mut self) -> Option<u8> {
        self.repr.pop()
    }

    /// Append `bytes`.
    ///
    /// When the content would not fit, capacity grows to the larger of
    /// double the current capacity and the exact length needed.
    ///
    /// # Panics
    ///
    /// Panics if the resulting length overflows `usize`.
    pub fn append(&mut self, bytes: &[u8]) -> &mut Self {
        let needed = match self.appended_len(bytes.len()) {
            Ok(needed) => needed,
            Err(err) => panic!("{err}"),
        };
        self.repr.grow_to(self.growth_target(needed));
        self.repr.extend(bytes);
        self
    }

    /// Fallible form of [`append`](Self::append).
    pub fn try_append(&mut self, bytes: &[u8]) -> Result<&mut Self, BufferError> {
        let needed = self.appended_len(bytes.len())?;
        self.repr.try_grow_to(self.growth_target(needed))?;
        self.repr.extend(bytes);
        Ok(self)
    }

    /// Append the content of another buffer.
    pub fn append_buffer(&mut self, other: &Self) -> &mut Self {
        self.append(other.as_bytes())
    }

    /// Length after appending `extra` bytes.
    fn appended_len(&self, extra: usize) -> Result<usize, BufferError> {
        self.len()
            .checked_add(extra)
            .ok_or(BufferError::CapacityOverflow)
    }

    /// Capacity to request so that `needed` bytes fit.
    fn growth_target(&self, needed: usize) -> usize {
        let capacity = self.capacity();
        if needed <= capacity {
            capacity
        } else {
            needed.max(grown_capacity(capacity))
        }
    }

    /// Grow capacity to exactly `capacity` if it is larger than the
    /// current one. Spills to the heap when `capacity > 15`.
    pub fn reserve(&mut self, capacity: usize) {
        self.repr.grow_to(capacity);
    }

    /// Fallible form of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), BufferError> {
        self.repr.try_grow_to(capacity)
    }

    /// Remove all content, keeping the current storage and mode.
    pub fn clear(&mut self) {
        self.repr.truncate(0);
    }

    /// Bounds-checked read of byte `index`.
    pub fn at(&self, index: usize) -> Result<&u8, BufferError> {
        self.as_bytes()
            .get(index)
            .ok_or(BufferError::out_of_range(index, self.len()))
    }

    /// Bounds-checked write access to byte `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut u8, BufferError> {
        let len = self.len();
        self.as_mut_bytes()
            .get_mut(index)
            .ok_or(BufferError::out_of_range(index, len))
    }

    /// First byte.
    pub fn front(&self) -> Option<&u8> {
        self.as_bytes().first()
    }

    /// Last byte.
    pub fn back(&self) -> Option<&u8> {
        self.as_bytes().last()
    }

    /// Copy of bytes `[pos, pos + len)`, clamped to the end of the buffer.
    ///
    /// `len == None` takes everything from `pos` on. `pos == len()` yields
    /// an empty buffer.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfRange`] if `pos > len()`.
    pub fn substr(&self, pos: usize, len: Option<usize>) -> Result<Self, BufferError> {
        let bytes = self.as_bytes();
        if pos > bytes.len() {
            return Err(BufferError::out_of_range(pos, bytes.len()));
        }
        let available = bytes.len() - pos;
        let take = len.map_or(available, |len| len.min(available));
        Ok(Self::from_bytes(&bytes[pos..pos + take]))
    }

    /// Cursor at the first byte.
    pub fn begin(&self) -> Cursor<'_, u8> {
        Cursor::begin(self.as_bytes())
    }

    /// One-past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, u8> {
        Cursor::end(self.as_bytes())
    }

    /// Move the content out, leaving this buffer empty and inline.
    pub fn take(&mut self) -> Self {
        Self {
            repr: self.repr.take(),
        }
    }

    /// Move-assign from `source`, leaving it empty and inline.
    pub fn assign_from(&mut self, source: &mut Self) -> &mut Self {
        self.repr = source.repr.take();
        self
    }

    /// Copy-assign: replace the content with a fresh copy of `source`.
    pub fn copy_from(&mut self, source: &Self) -> &mut Self {
        self.clone_from(source);
        self
    }

    /// Lossy UTF-8 rendering of the content.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl Default for HybridByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HybridByteBuffer {
    fn clone(&self) -> Self {
        Self::from_bytes(self.as_bytes())
    }
}

impl From<&[u8]> for HybridByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<const N: usize> From<&[u8; N]> for HybridByteBuffer {
    fn from(bytes: &[u8; N]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&str> for HybridByteBuffer {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl FromIterator<u8> for HybridByteBuffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl Extend<u8> for HybridByteBuffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for byte in iter {
            self.push(byte);
        }
    }
}

impl AddAssign<u8> for HybridByteBuffer {
    fn add_assign(&mut self, byte: u8) {
        self.push(byte);
    }
}

impl AddAssign<&HybridByteBuffer> for HybridByteBuffer {
    fn add_assign(&mut self, other: &HybridByteBuffer) {
        self.append_buffer(other);
    }
}

impl AddAssign<&[u8]> for HybridByteBuffer {
    fn add_assign(&mut self, bytes: &[u8]) {
        self.append(bytes);
    }
}

impl AddAssign<&str> for HybridByteBuffer {
    fn add_assign(&mut self, text: &str) {
        self.append(text.as_bytes());
    }
}

impl Deref for HybridByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl DerefMut for HybridByteBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_bytes()
    }
}

impl Index<usize> for HybridByteBuffer {
    type Output = u8;

    /// # Panics
    ///
    /// Panics with the [`BufferError::OutOfRange`] message when
    /// `index >= len()`.
    fn index(&self, index: usize) -> &u8 {
        match self.at(index) {
            Ok(byte) => byte,
            Err(err) => panic!("{err}"),
        }
    }
}

impl IndexMut<usize> for HybridByteBuffer {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        match self.at_mut(index) {
            Ok(byte) => byte,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a> IntoIterator for &'a HybridByteBuffer {
    type Item = &'a u8;
    type IntoIter = std::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_bytes().iter()
    }
}

impl PartialEq for HybridByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for HybridByteBuffer {}

impl PartialEq<[u8]> for HybridByteBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<str> for HybridByteBuffer {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for HybridByteBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for HybridByteBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HybridByteBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for HybridByteBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Display for HybridByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for HybridByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridByteBuffer")
            .field("content", &self.to_string_lossy())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("inline", &self.is_inline())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contig_test_utils::alpha_bytes;

    fn alpha(n: usize) -> HybridByteBuffer {
        HybridByteBuffer::from_bytes(&alpha_bytes(n))
    }

    #[test]
    fn default_is_empty_inline() {
        let s = HybridByteBuffer::new();
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
        assert!(s.is_inline());
        assert_eq!(s.capacity(), 15);
        assert_eq!(s.c_str(), c"");
    }

    #[test]
    fn fifteen_bytes_stay_inline_sixteen_spill() {
        let mut s = alpha(15);
        assert!(s.is_inline());
        s.push(b'!');
        assert!(!s.is_inline());
        assert_eq!(s.capacity(), 30);
        assert_eq!(s.len(), 16);
        assert_eq!(s.back(), Some(&b'!'));
    }

    #[test]
    fn clear_keeps_heap_mode() {
        let mut s = alpha(20);
        s.clear();
        assert!(s.is_empty());
        assert!(!s.is_inline());
        assert_eq!(s.c_str(), c"");
    }

    #[test]
    fn append_grows_to_exact_need_when_larger_than_double() {
        let mut s = HybridByteBuffer::from("ab");
        s.append(&[b'x'; 40]);
        assert_eq!(s.capacity(), 42);
        s.append(b"y");
        assert_eq!(s.capacity(), 84);
        assert_eq!(s.len(), 43);
    }

    #[test]
    fn append_within_capacity_does_not_reallocate() {
        let mut s = HybridByteBuffer::from("foo");
        s.append(b"bar").append(b"baz");
        assert!(s.is_inline());
        assert_eq!(s, "foobarbaz");
    }

    #[test]
    fn try_reserve_overflow_leaves_buffer_intact() {
        let mut s = alpha(20);
        assert_eq!(s.try_reserve(usize::MAX), Err(BufferError::CapacityOverflow));
        assert_eq!(s.capacity(), 20);
        assert_eq!(s, alpha(20));
    }

    #[test]
    fn try_push_spills_inline_to_heap() {
        let mut s = alpha(15);
        assert!(s.is_inline());
        assert_eq!(s.try_push(b'!'), Ok(()));
        assert!(!s.is_inline());
        assert_eq!(s.capacity(), 30);
        assert_eq!(s.len(), 16);
        assert_eq!(s.back(), Some(&b'!'));
        assert_eq!(s.as_bytes_with_nul().last(), Some(&0));
        assert_eq!(&s.as_bytes()[..15], alpha_bytes(15).as_slice());
    }

    #[test]
    fn try_append_reallocates_heap_block() {
        let mut s = HybridByteBuffer::from("ab");
        s.try_append(&[b'x'; 40]).unwrap();
        assert_eq!((s.len(), s.capacity()), (42, 42));
        s.try_append(b"y").unwrap().try_append(b"z").unwrap();
        assert_eq!((s.len(), s.capacity()), (44, 84));
        assert_eq!(s.as_bytes_with_nul().last(), Some(&0));
        assert_eq!(&s.as_bytes()[42..], b"yz");
    }

    #[test]
    fn appended_len_overflow_is_capacity_overflow() {
        let s = alpha(20);
        assert_eq!(s.appended_len(5), Ok(25));
        assert_eq!(
            s.appended_len(usize::MAX),
            Err(BufferError::CapacityOverflow)
        );
    }

    #[test]
    fn failed_growth_on_append_path_leaves_buffer_intact() {
        for mut s in [alpha(5), alpha(20)] {
            let before = (s.len(), s.capacity(), s.is_inline());
            let target = s.growth_target(usize::MAX);
            assert_eq!(target, usize::MAX);
            assert_eq!(
                s.repr.try_grow_to(target),
                Err(BufferError::CapacityOverflow)
            );
            assert_eq!((s.len(), s.capacity(), s.is_inline()), before);
            assert_eq!(s.as_bytes(), alpha_bytes(before.0).as_slice());
            assert_eq!(s.as_bytes_with_nul().last(), Some(&0));
        }
    }

    #[test]
    fn substr_at_end_is_empty() {
        let s = HybridByteBuffer::from("abc");
        assert_eq!(s.substr(3, None).unwrap(), "");
        assert_eq!(
            s.substr(4, None),
            Err(BufferError::out_of_range(4, 3))
        );
    }

    #[test]
    fn substr_of_heap_buffer_can_be_inline() {
        let s = alpha(30);
        let sub = s.substr(26, Some(100)).unwrap();
        assert!(sub.is_inline());
        assert_eq!(sub, "abcd");
    }

    #[test]
    fn c_str_stops_at_interior_nul() {
        let s = HybridByteBuffer::from(b"ab\0cd");
        assert_eq!(s.len(), 5);
        assert_eq!(s.c_str(), c"ab");
        assert_eq!(s.as_bytes_with_nul(), b"ab\0cd\0");
    }

    #[test]
    fn pop_walks_back_to_empty() {
        let mut s = HybridByteBuffer::from("ab");
        assert_eq!(s.pop(), Some(b'b'));
        assert_eq!(s.pop(), Some(b'a'));
        assert_eq!(s.pop(), None);
        assert_eq!(s.c_str(), c"");
    }

    #[test]
    fn with_fill_repeats_byte() {
        let s = HybridByteBuffer::with_fill(5, b'x');
        assert_eq!(s, "xxxxx");
        let long = HybridByteBuffer::with_fill(32, b'y');
        assert!(!long.is_inline());
        assert_eq!(long.capacity(), 32);
    }

    #[test]
    fn display_and_debug() {
        let s = HybridByteBuffer::from("hi");
        assert_eq!(s.to_string(), "hi");
        assert_eq!(
            format!("{s:?}"),
            "HybridByteBuffer { content: \"hi\", len: 2, capacity: 15, inline: true }"
        );
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = HybridByteBuffer::from("apple");
        let b = HybridByteBuffer::from("banana");
        assert!(a < b);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn mode_follows_length(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
                let s = HybridByteBuffer::from_bytes(&bytes);
                prop_assert_eq!(s.is_inline(), bytes.len() <= 15);
                prop_assert_eq!(s.as_bytes(), bytes.as_slice());
                prop_assert_eq!(s.as_bytes_with_nul().last(), Some(&0));
            }

            #[test]
            fn substr_matches_slice(
                bytes in proptest::collection::vec(any::<u8>(), 0..64),
                pos in 0usize..70,
                len in proptest::option::of(0usize..70),
            ) {
                let s = HybridByteBuffer::from_bytes(&bytes);
                match s.substr(pos, len) {
                    Ok(sub) => {
                        prop_assert!(pos <= bytes.len());
                        let end = len.map_or(bytes.len(), |len| (pos + len).min(bytes.len()));
                        prop_assert_eq!(sub.as_bytes(), &bytes[pos..end]);
                    }
                    Err(err) => {
                        prop_assert!(pos > bytes.len());
                        prop_assert_eq!(err, BufferError::out_of_range(pos, bytes.len()));
                    }
                }
            }

            #[test]
            fn pushes_match_vec(bytes in proptest::collection::vec(any::<u8>(), 0..100)) {
                let mut s = HybridByteBuffer::new();
                for &b in &bytes {
                    s.push(b);
                    prop_assert!(s.len() <= s.capacity());
                }
                prop_assert_eq!(s.as_bytes(), bytes.as_slice());
            }
        }
    }
}
