//! Core building blocks shared by the contig containers.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! pieces both containers are built from:
//!
//! ```text
//! contig-core
//! ├── growth   - next_capacity / grown_capacity (power-of-two policy)
//! ├── storage  - HeapBlock<T>: one owned allocation + explicit capacity
//! ├── cursor   - Cursor<'a, T>: random-access position into a slice
//! ├── config   - BufferConfig compile-time constants
//! └── error    - BufferError
//! ```
//!
//! `ContiguousBuffer<T>` (in `contig-vec`) is a thin layer over
//! [`HeapBlock`]. `HybridByteBuffer` (in `contig-bytes`) switches between an
//! inline array and a [`HeapBlock<u8>`]. Both hand out [`Cursor`]s over
//! their live elements, so the iterator contract is written once.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod cursor;
pub mod error;
pub mod growth;
pub mod storage;

pub use config::BufferConfig;
pub use cursor::Cursor;
pub use error::BufferError;
pub use growth::{grown_capacity, next_capacity};
pub use storage::HeapBlock;
