//! AVX2 Layout Primitives
//!
//! 8x8 word transpose and bulk byte reversal on YMM registers.

use crate::kernels::constants::{BYTESWAP_MASK, LANES, STATE_WORDS};

use core::arch::x86_64::{
    __m256i, _mm256_loadu_si256, _mm256_permute2x128_si256, _mm256_setzero_si256,
    _mm256_shuffle_epi8, _mm256_storeu_si256, _mm256_unpackhi_epi32, _mm256_unpackhi_epi64,
    _mm256_unpacklo_epi32, _mm256_unpacklo_epi64,
};

// =============================================================================
// REGISTER-LEVEL
// =============================================================================

/// Load the byte-reversal shuffle pattern.
// SAFETY: Requires AVX2 (enforced by dispatcher). Reads 32 bytes from a 32-byte static.
#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub(super) unsafe fn byteswap_mask() -> __m256i {
    _mm256_loadu_si256(BYTESWAP_MASK.as_ptr().cast())
}

/// Transpose eight rows of eight 32-bit words held in registers.
///
/// Row `i` element `j` ends up in row `j` element `i`.
// SAFETY: Requires AVX2 (enforced by dispatcher). Register-only operations.
#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub(super) unsafe fn transpose8(r: &mut [__m256i; 8]) {
    // 1. Interleave 32-bit pairs of adjacent rows
    let t0 = _mm256_unpacklo_epi32(r[0], r[1]);
    let t1 = _mm256_unpackhi_epi32(r[0], r[1]);
    let t2 = _mm256_unpacklo_epi32(r[2], r[3]);
    let t3 = _mm256_unpackhi_epi32(r[2], r[3]);
    let t4 = _mm256_unpacklo_epi32(r[4], r[5]);
    let t5 = _mm256_unpackhi_epi32(r[4], r[5]);
    let t6 = _mm256_unpacklo_epi32(r[6], r[7]);
    let t7 = _mm256_unpackhi_epi32(r[6], r[7]);

    // 2. Interleave 64-bit pairs: each 128-bit half now holds one column of four rows
    let u0 = _mm256_unpacklo_epi64(t0, t2);
    let u1 = _mm256_unpackhi_epi64(t0, t2);
    let u2 = _mm256_unpacklo_epi64(t1, t3);
    let u3 = _mm256_unpackhi_epi64(t1, t3);
    let u4 = _mm256_unpacklo_epi64(t4, t6);
    let u5 = _mm256_unpackhi_epi64(t4, t6);
    let u6 = _mm256_unpacklo_epi64(t5, t7);
    let u7 = _mm256_unpackhi_epi64(t5, t7);

    // 3. Join the halves of rows 0-3 and rows 4-7
    r[0] = _mm256_permute2x128_si256::<0x20>(u0, u4);
    r[1] = _mm256_permute2x128_si256::<0x20>(u1, u5);
    r[2] = _mm256_permute2x128_si256::<0x20>(u2, u6);
    r[3] = _mm256_permute2x128_si256::<0x20>(u3, u7);
    r[4] = _mm256_permute2x128_si256::<0x31>(u0, u4);
    r[5] = _mm256_permute2x128_si256::<0x31>(u1, u5);
    r[6] = _mm256_permute2x128_si256::<0x31>(u2, u6);
    r[7] = _mm256_permute2x128_si256::<0x31>(u3, u7);
}

// =============================================================================
// MEMORY-LEVEL
// =============================================================================

/// Transpose a 64-word buffer viewed as an 8x8 matrix, in place.
// SAFETY: Requires AVX2 (enforced by dispatcher). The buffer is exactly eight
// 32-byte rows; unaligned loads/stores only.
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub unsafe fn transpose(words: &mut [u32; STATE_WORDS * LANES]) {
    let ptr = words.as_mut_ptr().cast::<__m256i>();

    let mut rows = [_mm256_setzero_si256(); 8];
    for (i, row) in rows.iter_mut().enumerate() {
        *row = _mm256_loadu_si256(ptr.add(i));
    }
    transpose8(&mut rows);
    for (i, row) in rows.iter().enumerate() {
        _mm256_storeu_si256(ptr.add(i), *row);
    }
}

/// Reverse the byte order of every word, eight words per shuffle.
///
/// Trailing words beyond the last multiple of 8 are left untouched; the
/// dispatcher wrapper rejects such lengths before calling in.
// SAFETY: Requires AVX2 (enforced by dispatcher). `chunks_exact_mut(8)` yields
// 32-byte regions, so every load/store stays in bounds.
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub unsafe fn byteswap(words: &mut [u32]) {
    let mask = byteswap_mask();
    for chunk in words.chunks_exact_mut(LANES) {
        let ptr = chunk.as_mut_ptr().cast::<__m256i>();
        _mm256_storeu_si256(ptr, _mm256_shuffle_epi8(_mm256_loadu_si256(ptr), mask));
    }
}
