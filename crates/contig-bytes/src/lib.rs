//! Byte buffer with inline small-buffer storage and heap spill.
//!
//! [`HybridByteBuffer`] keeps up to 15 bytes inside the object itself and
//! moves to a heap block once content outgrows that. The switch is
//! one-way for an instance; copies are freshly sized and may land back
//! inline.
//!
//! ```
//! use contig_bytes::HybridByteBuffer;
//!
//! let s = HybridByteBuffer::from("hello world");
//! assert!(s.is_inline());
//! assert_eq!(s.substr(6, Some(5)).unwrap(), "world");
//! assert_eq!(s.substr(3, None).unwrap(), "lo world");
//! assert!(s.at(11).is_err());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
mod repr;

pub use buffer::HybridByteBuffer;
