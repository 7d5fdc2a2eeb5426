//! Benchmark workloads for the contig containers.
//!
//! All generators are seeded so repeated runs measure the same inputs:
//!
//! - [`random_indices`]: read positions for random-access benchmarks
//! - [`random_text`]: lowercase ASCII payloads
//! - [`short_words`]: payloads at or under the inline capacity

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use contig_core::BufferConfig;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// `count` indices in `0..len`.
///
/// # Panics
///
/// Panics if `len == 0`.
pub fn random_indices(len: usize, count: usize, seed: u64) -> Vec<usize> {
    assert!(len > 0, "cannot draw indices from an empty range");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.random_range(0..len)).collect()
}

/// `len` random lowercase ASCII letters.
pub fn random_text(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(b'a'..=b'z')).collect()
}

/// `count` words of 1 to 15 letters, each small enough to stay inline.
pub fn short_words(count: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.random_range(1..=BufferConfig::INLINE_CAPACITY);
            (0..len).map(|_| rng.random_range(b'a'..=b'z')).collect()
        })
        .collect()
}
