//! Error types for contig containers.

use thiserror::Error;

/// Errors reported by buffer operations.
///
/// `OutOfRange` is recoverable and never leaves the buffer modified.
/// `AllocationFailure` and `CapacityOverflow` are only returned by the
/// `try_*` forms; the infallible forms abort through the global
/// allocator's error handler instead, like the standard collections.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// An index or position argument was outside the valid bounds.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The offending index or position.
        index: usize,
        /// Length of the buffer at the time of the call.
        len: usize,
    },
    /// The allocator could not provide storage for the requested capacity.
    #[error("allocation failed for capacity {requested}")]
    AllocationFailure {
        /// Capacity (in elements) that was requested.
        requested: usize,
    },
    /// The requested capacity does not fit in the address space.
    #[error("capacity overflow")]
    CapacityOverflow,
}

impl BufferError {
    /// Shorthand for an [`OutOfRange`](Self::OutOfRange) error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Whether this error reports a bounds violation.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
