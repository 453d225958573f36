//! Streaming Engine
//!
//! Eight SHA-256 computations advanced in lock-step. Chaining state stays
//! word-major between calls and the partial block is buffered pre-transposed,
//! so neither path pays a layout conversion per block. Whole blocks arriving
//! on an empty buffer go straight from the caller's slices to the kernel.

use crate::engine::dispatcher::{best_kernel, kernel_for};
use crate::kernels::constants::{
    BLOCK_SIZE, DIGEST_SIZE, INTERLEAVED_BLOCK_SIZE, IV_WORD_MAJOR, LANES, LENGTH_OFFSET,
    STATE_WORDS,
};
use crate::types::{
    check_lane_lengths, Backend, CpuFeatureError, Digest, Kernel, LaneLengthError, State,
};
use core::fmt;

// =============================================================================
// STREAMING ENGINE
// =============================================================================

/// Eight-lane streaming SHA-256 engine.
///
/// Every `update` must hand all eight lanes the same number of bytes.
///
/// # Example
/// ```rust
/// use sha256x8::Sha256x8;
///
/// let mut engine = Sha256x8::new();
/// engine.update([b"ab".as_slice(); 8]);
/// engine.update([b"c".as_slice(); 8]);
/// let digests = engine.finalize();
/// assert_eq!(digests[7], sha256x8::digest_one(b"abc"));
/// ```
#[derive(Clone)]
pub struct Sha256x8 {
    /// Chaining values, word-major (`w * 8 + lane`).
    state: State,
    /// Partial block, interleaved: lane `l` byte `p` at `((p / 4) * 8 + l) * 4 + p % 4`.
    buffer: [u8; INTERLEAVED_BLOCK_SIZE],
    /// Bytes per lane currently held in `buffer` (always < 64 between calls).
    buffered: usize,
    /// Bytes absorbed per lane, excluding padding.
    len: u64,
    kernel: &'static Kernel,
}

impl Sha256x8 {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Create an engine on the fastest backend this CPU supports.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kernel(best_kernel())
    }

    /// Create an engine on an explicitly chosen backend.
    ///
    /// # Errors
    /// Returns `CpuFeatureError` if the backend needs CPU features this machine lacks.
    pub fn with_backend(backend: Backend) -> Result<Self, CpuFeatureError> {
        kernel_for(backend).map(Self::with_kernel)
    }

    const fn with_kernel(kernel: &'static Kernel) -> Self {
        Self {
            state: IV_WORD_MAJOR,
            buffer: [0u8; INTERLEAVED_BLOCK_SIZE],
            buffered: 0,
            len: 0,
            kernel,
        }
    }

    /// Return to the initial state. The backend is kept.
    pub fn reset(&mut self) {
        self.state = IV_WORD_MAJOR;
        self.buffered = 0;
        self.len = 0;
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Bytes absorbed per lane so far.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Whether nothing has been absorbed since creation or the last reset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backend this engine runs on.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.kernel.backend
    }

    // =========================================================================
    // STATE MODIFICATION
    // =========================================================================

    /// Absorb one chunk per lane.
    ///
    /// All eight chunks must have the same length. This is checked in debug
    /// builds only; use [`Sha256x8::try_update`] for untrusted input.
    pub fn update(&mut self, data: [&[u8]; LANES]) {
        debug_assert!(
            check_lane_lengths(&data).is_ok(),
            "all lanes must receive equal-length input"
        );
        self.len = self.len.wrapping_add(data[0].len() as u64);
        self.absorb(&data);
    }

    /// Absorb one chunk per lane after checking that all lengths match.
    ///
    /// # Errors
    /// Returns `LaneLengthError` without touching the engine if any lane's
    /// length differs from lane 0.
    pub fn try_update(&mut self, data: [&[u8]; LANES]) -> Result<(), LaneLengthError> {
        check_lane_lengths(&data)?;
        self.update(data);
        Ok(())
    }

    /// Buffer and compress without counting toward the message length.
    fn absorb(&mut self, data: &[&[u8]; LANES]) {
        let total = data[0].len();
        let mut offset = 0;

        while offset < total {
            let remaining = total - offset;

            // Direct path: whole blocks straight from the caller's slices.
            if self.buffered == 0 && remaining >= BLOCK_SIZE {
                let blocks = remaining / BLOCK_SIZE;
                let lanes: [&[u8]; LANES] = core::array::from_fn(|l| &data[l][offset..]);
                (self.kernel.compress_lanes)(&mut self.state, &lanes, blocks);
                offset += blocks * BLOCK_SIZE;
                continue;
            }

            let take = (BLOCK_SIZE - self.buffered).min(remaining);
            for (l, lane) in data.iter().enumerate() {
                for (i, &byte) in lane[offset..offset + take].iter().enumerate() {
                    let p = self.buffered + i;
                    self.buffer[((p / 4) * LANES + l) * 4 + p % 4] = byte;
                }
            }
            self.buffered += take;
            offset += take;

            if self.buffered == BLOCK_SIZE {
                (self.kernel.compress_interleaved)(&mut self.state, &self.buffer);
                self.buffered = 0;
            }
        }
    }

    // =========================================================================
    // FINALIZATION
    // =========================================================================

    /// Finalize all eight lanes into `out`.
    pub fn finalize_into(mut self, out: &mut [Digest; LANES]) {
        self.finish(out);
    }

    /// Finalize and return the eight digests, lane order preserved.
    #[must_use]
    pub fn finalize(mut self) -> [Digest; LANES] {
        let mut out = [[0u8; DIGEST_SIZE]; LANES];
        self.finish(&mut out);
        out
    }

    /// Finalize, then return the engine to its initial state.
    pub fn finalize_reset(&mut self) -> [Digest; LANES] {
        let mut out = [[0u8; DIGEST_SIZE]; LANES];
        self.finish(&mut out);
        self.reset();
        out
    }

    fn finish(&mut self, out: &mut [Digest; LANES]) {
        // 0x80, zeros up to the length field, then the 64-bit big-endian bit count.
        // Spills into a second block when fewer than 9 bytes remain.
        let pad_len = if self.buffered < LENGTH_OFFSET {
            LENGTH_OFFSET - self.buffered
        } else {
            LENGTH_OFFSET + BLOCK_SIZE - self.buffered
        };
        let mut tail = [0u8; 2 * BLOCK_SIZE];
        tail[0] = 0x80;
        tail[pad_len..pad_len + 8].copy_from_slice(&self.len.wrapping_mul(8).to_be_bytes());
        self.absorb(&[&tail[..pad_len + 8]; LANES]);

        assert_eq!(
            self.buffered, 0,
            "padding left a partial block behind; refusing to emit digests"
        );

        // Word-major -> lane-major, then big-endian bytes per word.
        let mut words = self.state;
        (self.kernel.transpose)(&mut words);
        (self.kernel.byteswap)(&mut words);
        let (chains, _) = words.as_chunks::<STATE_WORDS>();
        for (digest, chain) in out.iter_mut().zip(chains) {
            let (bytes, _) = digest.as_chunks_mut::<4>();
            for (dst, word) in bytes.iter_mut().zip(chain) {
                *dst = word.to_le_bytes();
            }
        }
    }
}

// =============================================================================
// TRAIT IMPL
// =============================================================================

impl Default for Sha256x8 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sha256x8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256x8")
            .field("backend", &self.kernel.backend)
            .field("len", &self.len)
            .field("buffered", &self.buffered)
            .finish_non_exhaustive()
    }
}
