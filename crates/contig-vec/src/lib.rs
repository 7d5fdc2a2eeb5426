//! Growable contiguous sequence with power-of-two growth.
//!
//! [`ContiguousBuffer<T>`] always keeps its elements in one heap block.
//! Capacity starts at 1 and doubles whenever a push finds the buffer full,
//! so a buffer that reached N elements by pushing has the same capacity as
//! one built directly from N elements: the smallest power of two `>= N`.
//!
//! ```
//! use contig_vec::ContiguousBuffer;
//!
//! let mut vec = ContiguousBuffer::new();
//! assert_eq!((vec.len(), vec.capacity()), (0, 1));
//! for x in 1..=5 {
//!     vec.push(x);
//! }
//! assert_eq!((vec.len(), vec.capacity()), (5, 8));
//! assert_eq!(vec.to_string(), "{ 1 2 3 4 5 }");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod render;

pub use buffer::ContiguousBuffer;
pub use render::{render, Rendered};
