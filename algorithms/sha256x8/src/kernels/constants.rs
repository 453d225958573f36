//! SHA-256 Kernel Constants
//!
//! Round constants and initial hash value from FIPS 180-4, §4.2.2 and §5.3.3:
//!
//! ```text
//! K[i] = floor(frac(cbrt(p_i)) * 2^32)   for the first 64 primes
//! IV[i] = floor(frac(sqrt(p_i)) * 2^32)  for the first 8 primes
//! ```
//!
//! Everything here is read-only and shared by every engine and kernel.

// =============================================================================
// STRUCTURAL CONSTANTS
// =============================================================================

/// Number of independent hash computations carried by one engine.
pub const LANES: usize = 8;

/// Compression function block size (in bytes).
pub const BLOCK_SIZE: usize = 64;

/// Words of chaining state per lane (a..h).
pub const STATE_WORDS: usize = 8;

/// Digest size per lane (in bytes).
pub const DIGEST_SIZE: usize = 32;

/// Offset of the 64-bit big-endian bit-length field inside the final block.
pub const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// Size of one full block across all lanes (in bytes).
pub const INTERLEAVED_BLOCK_SIZE: usize = BLOCK_SIZE * LANES;

/// Message words per block.
pub const BLOCK_WORDS: usize = BLOCK_SIZE / 4;

// =============================================================================
// ROUND CONSTANTS
// =============================================================================

/// SHA-256 round constants.
#[rustfmt::skip]
pub static K: [u32; 64] = [
    0x428a_2f98, 0x7137_4491, 0xb5c0_fbcf, 0xe9b5_dba5, 0x3956_c25b, 0x59f1_11f1, 0x923f_82a4, 0xab1c_5ed5,
    0xd807_aa98, 0x1283_5b01, 0x2431_85be, 0x550c_7dc3, 0x72be_5d74, 0x80de_b1fe, 0x9bdc_06a7, 0xc19b_f174,
    0xe49b_69c1, 0xefbe_4786, 0x0fc1_9dc6, 0x240c_a1cc, 0x2de9_2c6f, 0x4a74_84aa, 0x5cb0_a9dc, 0x76f9_88da,
    0x983e_5152, 0xa831_c66d, 0xb003_27c8, 0xbf59_7fc7, 0xc6e0_0bf3, 0xd5a7_9147, 0x06ca_6351, 0x1429_2967,
    0x27b7_0a85, 0x2e1b_2138, 0x4d2c_6dfc, 0x5338_0d13, 0x650a_7354, 0x766a_0abb, 0x81c2_c92e, 0x9272_2c85,
    0xa2bf_e8a1, 0xa81a_664b, 0xc24b_8b70, 0xc76c_51a3, 0xd192_e819, 0xd699_0624, 0xf40e_3585, 0x106a_a070,
    0x19a4_c116, 0x1e37_6c08, 0x2748_774c, 0x34b0_bcb5, 0x391c_0cb3, 0x4ed8_aa4a, 0x5b9c_ca4f, 0x682e_6ff3,
    0x748f_82ee, 0x78a5_636f, 0x84c8_7814, 0x8cc7_0208, 0x90be_fffa, 0xa450_6ceb, 0xbef9_a3f7, 0xc671_78f2,
];

// =============================================================================
// INITIAL HASH VALUE
// =============================================================================

/// SHA-256 initial chaining value for a single lane.
pub const IV: [u32; STATE_WORDS] = [
    0x6a09_e667,
    0xbb67_ae85,
    0x3c6e_f372,
    0xa54f_f53a,
    0x510e_527f,
    0x9b05_688c,
    0x1f83_d9ab,
    0x5be0_cd19,
];

/// `IV` broadcast to all lanes in word-major order: `IV[w]` repeated eight times per word.
pub const IV_WORD_MAJOR: [u32; STATE_WORDS * LANES] = {
    let mut out = [0u32; STATE_WORDS * LANES];
    let mut i = 0;
    while i < out.len() {
        out[i] = IV[i / LANES];
        i += 1;
    }
    out
};

// =============================================================================
// BYTE ORDER
// =============================================================================

/// `PSHUFB` pattern reversing the bytes of every 32-bit word.
///
/// The 16-byte pattern is repeated for both 128-bit halves of a YMM register.
#[rustfmt::skip]
pub static BYTESWAP_MASK: [u8; 32] = [
    0x3, 0x2, 0x1, 0x0, 0x7, 0x6, 0x5, 0x4, 0xb, 0xa, 0x9, 0x8, 0xf, 0xe, 0xd, 0xc,
    0x3, 0x2, 0x1, 0x0, 0x7, 0x6, 0x5, 0x4, 0xb, 0xa, 0x9, 0x8, 0xf, 0xe, 0xd, 0xc,
];
