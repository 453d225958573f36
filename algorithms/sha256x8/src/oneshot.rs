//! Public API Layer
//!
use crate::kernels::constants::{DIGEST_SIZE, LANES};
use crate::kernels::portable::Sha256;
use crate::streaming::Sha256x8;
use crate::types::{check_lane_lengths, Digest, LaneLengthError};
use subtle::ConstantTimeEq;

// =============================================================================
// BATCH HASHING
// =============================================================================

/// Compute the SHA-256 digests of eight equal-length inputs.
///
/// # Example
/// ```rust
/// let inputs: [&[u8]; 8] = [b"a", b"b", b"c", b"d", b"e", b"f", b"g", b"h"];
/// let digests = sha256x8::digest_all(inputs);
/// assert_eq!(digests[2], sha256x8::digest_one(b"c"));
/// ```
#[must_use]
pub fn digest_all(inputs: [&[u8]; LANES]) -> [Digest; LANES] {
    let mut out = [[0u8; DIGEST_SIZE]; LANES];
    digest_all_into(inputs, &mut out);
    out
}

/// Compute the SHA-256 digests of eight equal-length inputs into `out`.
pub fn digest_all_into(inputs: [&[u8]; LANES], out: &mut [Digest; LANES]) {
    let mut engine = Sha256x8::new();
    engine.update(inputs);
    engine.finalize_into(out);
}

/// Checked variant of [`digest_all`].
///
/// # Errors
/// Returns `LaneLengthError` if the inputs differ in length.
pub fn try_digest_all(inputs: [&[u8]; LANES]) -> Result<[Digest; LANES], LaneLengthError> {
    check_lane_lengths(&inputs)?;
    Ok(digest_all(inputs))
}

/// Compute the SHA-256 digest of a single input on the scalar path.
#[must_use]
#[inline]
pub fn digest_one(input: &[u8]) -> Digest {
    Sha256::digest(input)
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Verify eight inputs against expected digests in constant time, per lane.
///
/// # Example
/// ```rust
/// let inputs = [b"payload".as_slice(); 8];
/// let mut expected = sha256x8::digest_all(inputs);
/// expected[4][0] ^= 1;
/// let ok = sha256x8::verify_all(inputs, &expected);
/// assert_eq!(ok, [true, true, true, true, false, true, true, true]);
/// ```
#[must_use]
pub fn verify_all(inputs: [&[u8]; LANES], expected: &[Digest; LANES]) -> [bool; LANES] {
    let computed = digest_all(inputs);
    core::array::from_fn(|l| computed[l].ct_eq(&expected[l]).into())
}
