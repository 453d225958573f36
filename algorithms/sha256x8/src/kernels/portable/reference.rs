//! Single-lane streaming SHA-256.
//!
//! Reference hasher for cross-validation and for inputs that cannot be
//! grouped into eight equal-length lanes.

use super::scalar::compress_block;
use crate::kernels::constants::{BLOCK_SIZE, IV, LENGTH_OFFSET, STATE_WORDS};
use crate::types::Digest;

#[cfg(feature = "digest-trait")]
use crypto_common::BlockSizeUser;
#[cfg(feature = "digest-trait")]
use digest::typenum::{U32, U64};
#[cfg(feature = "digest-trait")]
use digest::{FixedOutput, HashMarker, Output, OutputSizeUser, Reset, Update};

// =============================================================================
// REFERENCE HASHER
// =============================================================================

/// Scalar SHA-256 hasher.
#[derive(Clone, Debug)]
pub struct Sha256 {
    state: [u32; STATE_WORDS],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    len: u64,
}

impl Sha256 {
    /// Create a hasher in the initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: IV,
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
            len: 0,
        }
    }

    /// Hash `input` in one call.
    #[must_use]
    pub fn digest(input: &[u8]) -> Digest {
        let mut hasher = Self::new();
        hasher.update(input);
        hasher.finalize()
    }

    /// Add data to the hasher.
    pub fn update(&mut self, mut data: &[u8]) {
        self.len = self.len.wrapping_add(data.len() as u64);

        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < BLOCK_SIZE {
                return;
            }
            compress_block(&mut self.state, &self.buffer);
            self.buffered = 0;
        }

        let (blocks, rest) = data.as_chunks::<BLOCK_SIZE>();
        for block in blocks {
            compress_block(&mut self.state, block);
        }
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Finalize and return the digest.
    #[must_use]
    pub fn finalize(mut self) -> Digest {
        let bit_len = self.len.wrapping_mul(8);

        self.buffer[self.buffered] = 0x80;
        self.buffer[self.buffered + 1..].fill(0);
        if self.buffered >= LENGTH_OFFSET {
            compress_block(&mut self.state, &self.buffer);
            self.buffer.fill(0);
        }
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
        compress_block(&mut self.state, &self.buffer);

        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// Reset hasher for reuse.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TRAIT IMPL
// =============================================================================

#[cfg(feature = "digest-trait")]
impl OutputSizeUser for Sha256 {
    type OutputSize = U32;
}

#[cfg(feature = "digest-trait")]
impl BlockSizeUser for Sha256 {
    type BlockSize = U64;
}

#[cfg(feature = "digest-trait")]
impl Update for Sha256 {
    fn update(&mut self, data: &[u8]) {
        self.update(data);
    }
}

#[cfg(feature = "digest-trait")]
impl FixedOutput for Sha256 {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.finalize());
    }
}

#[cfg(feature = "digest-trait")]
impl Reset for Sha256 {
    fn reset(&mut self) {
        self.reset();
    }
}

#[cfg(feature = "digest-trait")]
impl HashMarker for Sha256 {}
