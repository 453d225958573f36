//! Portable implementation of the eight-lane kernel.
//!
//! Runs the scalar compression function once per lane. Used on CPUs without
//! AVX2 and as the reference the accelerated kernels are checked against.

use crate::kernels::constants::{
    BLOCK_SIZE, BLOCK_WORDS, INTERLEAVED_BLOCK_SIZE, LANES, STATE_WORDS,
};
use crate::types::{Backend, Kernel, State};

mod reference;
mod scalar;

pub use reference::Sha256;
pub use scalar::{compress_block, compress_words};

// =============================================================================
// KERNEL TABLE
// =============================================================================

/// Function table for the portable backend.
pub static KERNEL: Kernel = Kernel {
    backend: Backend::Portable,
    compress_lanes,
    compress_interleaved,
    transpose,
    byteswap,
};

// =============================================================================
// LAYOUT PRIMITIVES
// =============================================================================

/// Transpose a 64-word buffer viewed as an 8x8 matrix, in place.
pub fn transpose(words: &mut [u32; STATE_WORDS * LANES]) {
    for row in 0..LANES {
        for col in (row + 1)..LANES {
            words.swap(row * LANES + col, col * LANES + row);
        }
    }
}

/// Reverse the byte order of every word, in place.
///
/// # Panics
/// Panics if `words.len()` is not a multiple of 8.
pub fn byteswap(words: &mut [u32]) {
    assert!(
        words.len().is_multiple_of(LANES),
        "byteswap requires a multiple of {LANES} words, got {}",
        words.len()
    );
    for w in words {
        *w = w.swap_bytes();
    }
}

// =============================================================================
// COMPRESSION
// =============================================================================

/// Absorb `blocks` blocks from each lane slice into word-major `state`.
///
/// # Panics
/// Panics if any lane holds fewer than `blocks * 64` bytes.
pub fn compress_lanes(state: &mut State, lanes: &[&[u8]; LANES], blocks: usize) {
    let len = blocks * BLOCK_SIZE;

    // Lane-major while working one lane at a time.
    transpose(state);
    let (chains, _) = state.as_chunks_mut::<STATE_WORDS>();
    for (chain, data) in chains.iter_mut().zip(lanes) {
        let (input, _) = data[..len].as_chunks::<BLOCK_SIZE>();
        for block in input {
            scalar::compress_block(chain, block);
        }
    }
    transpose(state);
}

/// Absorb one interleaved 512-byte block into word-major `state`.
pub fn compress_interleaved(state: &mut State, block: &[u8; INTERLEAVED_BLOCK_SIZE]) {
    // Native little-endian load, then the bulk byte swap yields the big-endian message words.
    let mut words = [0u32; BLOCK_WORDS * LANES];
    let (bytes, _) = block.as_chunks::<4>();
    for (w, b) in words.iter_mut().zip(bytes) {
        *w = u32::from_le_bytes(*b);
    }
    byteswap(&mut words);

    for lane in 0..LANES {
        let mut chain: [u32; STATE_WORDS] = core::array::from_fn(|w| state[w * LANES + lane]);
        let message: [u32; BLOCK_WORDS] = core::array::from_fn(|j| words[j * LANES + lane]);
        scalar::compress_words(&mut chain, &message);
        for (w, value) in chain.into_iter().enumerate() {
            state[w * LANES + lane] = value;
        }
    }
}
