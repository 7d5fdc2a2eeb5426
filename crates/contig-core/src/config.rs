//! Buffer configuration constants.

/// Compile-time parameters shared by the contig containers.
///
/// There is no runtime configuration: allocator customisation is not
/// supported, and the inline area size is part of the byte buffer's layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct BufferConfig;

impl BufferConfig {
    /// Capacity of a freshly constructed `ContiguousBuffer`.
    ///
    /// One slot is allocated up front so the first push never reallocates.
    pub const DEFAULT_CAPACITY: usize = 1;

    /// Size in bytes of the byte buffer's inline area, terminator included.
    pub const INLINE_AREA: usize = 16;

    /// Usable capacity of the inline area.
    ///
    /// One byte of [`INLINE_AREA`](Self::INLINE_AREA) is reserved for the
    /// terminator, so a byte buffer holds at most 15 bytes before spilling
    /// to the heap.
    pub const INLINE_CAPACITY: usize = Self::INLINE_AREA - 1;

    /// Byte written at index `len` of every byte buffer.
    pub const TERMINATOR: u8 = 0;

    /// Whether `len` content bytes fit in the inline area.
    pub const fn fits_inline(len: usize) -> bool {
        len <= Self::INLINE_CAPACITY
    }
}
