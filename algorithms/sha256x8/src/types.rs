//! Shared types used across the SHA256x8 library.

use crate::kernels::constants::{DIGEST_SIZE, INTERLEAVED_BLOCK_SIZE, LANES, STATE_WORDS};
use core::fmt;
#[cfg(feature = "std")]
use std::error;

/// A single SHA-256 digest (big-endian words, directly comparable to any SHA-256 output).
pub type Digest = [u8; DIGEST_SIZE];

/// Eight-lane chaining state, 64 words.
///
/// Inside the engine and at the kernel boundary the words are word-major:
/// index `w * 8 + lane` holds word `w` (a..h) of `lane`.
pub type State = [u32; STATE_WORDS * LANES];

// =============================================================================
// KERNEL INTERFACE
// =============================================================================

/// Absorb `blocks` consecutive 64-byte blocks from each of the eight lane slices.
///
/// Every slice must hold at least `blocks * 64` bytes.
pub type CompressLanesFn = fn(&mut State, &[&[u8]; LANES], usize);

/// Absorb one block per lane from a 512-byte interleaved buffer.
///
/// Message word `j` of lane `l` lives at byte offset `(j * 8 + l) * 4`, stored big-endian.
pub type CompressInterleavedFn = fn(&mut State, &[u8; INTERLEAVED_BLOCK_SIZE]);

/// Transpose a 64-word buffer viewed as an 8x8 matrix. Its own inverse.
pub type TransposeFn = fn(&mut [u32; STATE_WORDS * LANES]);

/// Reverse the byte order of every word. The length must be a multiple of 8.
pub type ByteswapFn = fn(&mut [u32]);

/// Function table for one hardware backend.
///
/// All backends produce bit-identical results, so the dispatcher can swap
/// them freely at startup.
#[derive(Debug)]
pub struct Kernel {
    /// Backend implementing the table.
    pub backend: Backend,
    /// Multi-block compression straight from caller input.
    pub compress_lanes: CompressLanesFn,
    /// Single-block compression from the interleaved partial-block buffer.
    pub compress_interleaved: CompressInterleavedFn,
    /// Layout conversion between lane-major and word-major.
    pub transpose: TransposeFn,
    /// Bulk 32-bit byte reversal.
    pub byteswap: ByteswapFn,
}

// =============================================================================
// BACKENDS
// =============================================================================

/// Hardware backends the dispatcher can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// AVX2, eight 32-bit lanes per YMM register.
    Avx2,
    /// Scalar fallback, one lane at a time.
    Portable,
}

impl Backend {
    /// Human-readable backend name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Avx2 => "AVX2",
            Self::Portable => "Portable",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error for unsupported CPU features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuFeatureError {
    missing: &'static str,
}

impl CpuFeatureError {
    /// Create a new `CpuFeatureError` describing the missing CPU feature.
    pub const fn new(missing: &'static str) -> Self {
        Self { missing }
    }

    /// Name of the missing CPU feature.
    #[must_use]
    pub const fn missing(&self) -> &'static str {
        self.missing
    }
}

impl fmt::Display for CpuFeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU feature '{}' required by the requested backend. \
             Supported: Intel Haswell+, AMD Excavator+",
            self.missing
        )
    }
}

#[cfg(feature = "std")]
impl error::Error for CpuFeatureError {}

/// Error returned by the checked absorb paths when lane inputs differ in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneLengthError {
    lane: usize,
    expected: usize,
    actual: usize,
}

impl LaneLengthError {
    pub(crate) const fn new(lane: usize, expected: usize, actual: usize) -> Self {
        Self {
            lane,
            expected,
            actual,
        }
    }

    /// Index of the first lane whose length differs from lane 0.
    #[must_use]
    pub const fn lane(&self) -> usize {
        self.lane
    }

    /// Length of lane 0.
    #[must_use]
    pub const fn expected(&self) -> usize {
        self.expected
    }

    /// Length of the offending lane.
    #[must_use]
    pub const fn actual(&self) -> usize {
        self.actual
    }
}

impl fmt::Display for LaneLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "all lanes must receive equal-length input: lane {} has {} bytes, lane 0 has {}",
            self.lane, self.actual, self.expected
        )
    }
}

#[cfg(feature = "std")]
impl error::Error for LaneLengthError {}

/// Check that all eight lane inputs have the same length.
///
/// # Errors
/// Returns `LaneLengthError` naming the first lane that differs from lane 0.
pub(crate) fn check_lane_lengths(data: &[&[u8]; LANES]) -> Result<usize, LaneLengthError> {
    let expected = data[0].len();
    match data.iter().position(|lane| lane.len() != expected) {
        Some(lane) => Err(LaneLengthError::new(lane, expected, data[lane].len())),
        None => Ok(expected),
    }
}
