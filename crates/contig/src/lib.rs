//! Contig: contiguous containers with explicit growth and ownership rules.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all contig sub-crates. For most users, adding `contig` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use contig::prelude::*;
//!
//! // Generic sequence: capacity doubles on overflow.
//! let mut vec = ContiguousBuffer::new();
//! for x in 1..=5 {
//!     vec.push(x);
//! }
//! assert_eq!((vec.len(), vec.capacity()), (5, 8));
//! assert_eq!(*(vec.begin() + 2), vec[2]);
//!
//! // Byte buffer: inline up to 15 bytes, heap beyond.
//! let mut text = HybridByteBuffer::from("hello");
//! assert!(text.is_inline());
//! text += " world, spilled";
//! assert!(!text.is_inline());
//! assert_eq!(text.substr(6, Some(5))?, "world");
//! # Ok::<(), BufferError>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `contig-core` | Growth policy, `Cursor`, `HeapBlock`, `BufferError` |
//! | [`vec`] | `contig-vec` | `ContiguousBuffer<T>` and `{ ... }` rendering |
//! | [`bytes`] | `contig-bytes` | `HybridByteBuffer` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Shared building blocks (`contig-core`).
pub use contig_core as types;

/// The generic growable sequence (`contig-vec`).
pub use contig_vec as vec;

/// The small-buffer-optimised byte buffer (`contig-bytes`).
pub use contig_bytes as bytes;

/// Common imports for typical contig usage.
///
/// ```rust
/// use contig::prelude::*;
/// ```
pub mod prelude {
    pub use contig_bytes::HybridByteBuffer;
    pub use contig_core::{BufferError, Cursor};
    pub use contig_vec::{render, ContiguousBuffer};
}
