//! Test fixtures for contig development.
//!
//! Fixtures return plain `Vec`s so they can feed any container under test
//! without this crate depending on the containers themselves.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{alpha_bytes, sequence, DropCounter, DropTally};
