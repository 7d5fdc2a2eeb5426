//! Inline / heap storage representation of the byte buffer.
//!
//! Exactly one mode is active, enforced by the enum:
//!
//! - `Inline`: up to 15 content bytes in a 16-byte area, terminator in
//!   the slot after the last content byte. Capacity is always 15.
//! - `Heap`: a [`HeapBlock<u8>`] holding the content bytes followed by the
//!   terminator, so `block.len() == len + 1` and
//!   `block.capacity() == capacity + 1`.
//!
//! Mutators here assume the caller has already made room with
//! [`Repr::grow_to`]; growth policy lives in the buffer type.

use std::mem;

use contig_core::{BufferConfig, BufferError, HeapBlock};
use tracing::trace;

const AREA: usize = BufferConfig::INLINE_AREA;
const NUL: u8 = BufferConfig::TERMINATOR;

pub(crate) enum Repr {
    Inline { area: [u8; AREA], len: u8 },
    Heap(HeapBlock<u8>),
}

impl Repr {
    pub(crate) const fn empty() -> Self {
        Self::Inline {
            area: [NUL; AREA],
            len: 0,
        }
    }

    /// Freshly sized copy of `bytes`: inline if it fits, else a heap block
    /// with capacity exactly `bytes.len()`.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        if BufferConfig::fits_inline(bytes.len()) {
            let mut area = [NUL; AREA];
            area[..bytes.len()].copy_from_slice(bytes);
            return Self::Inline {
                area,
                len: bytes.len() as u8,
            };
        }
        let mut block = HeapBlock::with_capacity(bytes.len() + 1);
        block.extend_from_slice(bytes);
        block.push(NUL);
        Self::Heap(block)
    }

    pub(crate) fn is_inline(&self) -> bool {
        matches!(self, Self::Inline { .. })
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Inline { len, .. } => *len as usize,
            Self::Heap(block) => block.len() - 1,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        match self {
            Self::Inline { .. } => BufferConfig::INLINE_CAPACITY,
            Self::Heap(block) => block.capacity() - 1,
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        let with_nul = self.as_bytes_with_nul();
        &with_nul[..with_nul.len() - 1]
    }

    pub(crate) fn as_bytes_with_nul(&self) -> &[u8] {
        match self {
            Self::Inline { area, len } => &area[..=*len as usize],
            Self::Heap(block) => block.as_slice(),
        }
    }

    /// Content bytes only; the terminator slot is not exposed.
    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        match self {
            Self::Inline { area, len } => &mut area[..*len as usize],
            Self::Heap(block) => {
                let bytes = block.as_mut_slice();
                let content = bytes.len() - 1;
                &mut bytes[..content]
            }
        }
    }

    /// Make room for at least `capacity` content bytes.
    ///
    /// Inline storage that cannot hold `capacity` spills to a heap block of
    /// exactly `capacity`; heap storage reallocates to exactly `capacity`.
    pub(crate) fn grow_to(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return;
        }
        let slots = capacity.checked_add(1).unwrap_or(usize::MAX);
        match self {
            Self::Inline { .. } => {
                let block = HeapBlock::with_capacity(slots);
                self.spill(block);
            }
            Self::Heap(block) => block.grow_to(slots),
        }
    }

    /// Fallible form of [`grow_to`](Self::grow_to). Leaves `self` untouched
    /// on error.
    pub(crate) fn try_grow_to(&mut self, capacity: usize) -> Result<(), BufferError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let slots = capacity.checked_add(1).ok_or(BufferError::CapacityOverflow)?;
        match self {
            Self::Inline { .. } => {
                let block = HeapBlock::try_with_capacity(slots)?;
                self.spill(block);
            }
            Self::Heap(block) => block.try_grow_to(slots)?,
        }
        Ok(())
    }

    /// Move inline content into `block` and switch to heap mode.
    fn spill(&mut self, mut block: HeapBlock<u8>) {
        block.extend_from_slice(self.as_bytes_with_nul());
        trace!(
            len = block.len() - 1,
            new_capacity = block.capacity() - 1,
            "byte buffer spilled to heap"
        );
        *self = Self::Heap(block);
    }

    /// Append one byte. Requires `len() < capacity()`.
    pub(crate) fn push(&mut self, byte: u8) {
        match self {
            Self::Inline { area, len } => {
                let at = *len as usize;
                area[at] = byte;
                area[at + 1] = NUL;
                *len += 1;
            }
            Self::Heap(block) => {
                block.pop();
                block.push(byte);
                block.push(NUL);
            }
        }
    }

    /// Append `bytes`. Requires `len() + bytes.len() <= capacity()`.
    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        match self {
            Self::Inline { area, len } => {
                let start = *len as usize;
                let end = start + bytes.len();
                area[start..end].copy_from_slice(bytes);
                area[end] = NUL;
                *len = end as u8;
            }
            Self::Heap(block) => {
                block.pop();
                block.extend_from_slice(bytes);
                block.push(NUL);
            }
        }
    }

    pub(crate) fn pop(&mut self) -> Option<u8> {
        match self {
            Self::Inline { area, len } => {
                if *len == 0 {
                    return None;
                }
                *len -= 1;
                let at = *len as usize;
                let byte = area[at];
                area[at] = NUL;
                Some(byte)
            }
            Self::Heap(block) => {
                if block.len() == 1 {
                    return None;
                }
                block.pop();
                let byte = block.pop();
                block.push(NUL);
                byte
            }
        }
    }

    /// Drop content past `new_len`, keeping the current mode and storage.
    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }
        match self {
            Self::Inline { area, len } => {
                area[new_len] = NUL;
                *len = new_len as u8;
            }
            Self::Heap(block) => {
                block.truncate(new_len);
                block.push(NUL);
            }
        }
    }

    /// Move the storage out, leaving an empty inline representation.
    pub(crate) fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }
}
