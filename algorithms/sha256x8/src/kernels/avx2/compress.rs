//! AVX2 Block Compression
//!
//! Eight SHA-256 compressions in lock-step: YMM register `w` holds state word
//! `w` (a..h) of all eight lanes, so every round is one pass of vector ops.

#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]

use super::layout::{byteswap_mask, transpose8};
use crate::kernels::constants::{BLOCK_SIZE, BLOCK_WORDS, INTERLEAVED_BLOCK_SIZE, K, LANES};
use crate::types::State;

use core::arch::x86_64::{
    __m256i, _mm256_add_epi32, _mm256_and_si256, _mm256_andnot_si256, _mm256_loadu_si256,
    _mm256_or_si256, _mm256_set1_epi32, _mm256_setzero_si256, _mm256_shuffle_epi8,
    _mm256_slli_epi32, _mm256_srli_epi32, _mm256_storeu_si256, _mm256_xor_si256,
};

// =============================================================================
// ROUND FUNCTIONS
// =============================================================================

macro_rules! rotr {
    ($x:expr, $n:literal) => {
        _mm256_or_si256(_mm256_srli_epi32::<$n>($x), _mm256_slli_epi32::<{ 32 - $n }>($x))
    };
}

macro_rules! add {
    ($x:expr) => { $x };
    ($x:expr, $($rest:expr),+) => { _mm256_add_epi32($x, add!($($rest),+)) };
}

#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
unsafe fn ch(e: __m256i, f: __m256i, g: __m256i) -> __m256i {
    _mm256_xor_si256(_mm256_and_si256(e, f), _mm256_andnot_si256(e, g))
}

#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
unsafe fn maj(a: __m256i, b: __m256i, c: __m256i) -> __m256i {
    _mm256_xor_si256(
        _mm256_xor_si256(_mm256_and_si256(a, b), _mm256_and_si256(a, c)),
        _mm256_and_si256(b, c),
    )
}

#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
unsafe fn big_sigma0(a: __m256i) -> __m256i {
    _mm256_xor_si256(_mm256_xor_si256(rotr!(a, 2), rotr!(a, 13)), rotr!(a, 22))
}

#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
unsafe fn big_sigma1(e: __m256i) -> __m256i {
    _mm256_xor_si256(_mm256_xor_si256(rotr!(e, 6), rotr!(e, 11)), rotr!(e, 25))
}

#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
unsafe fn small_sigma0(w: __m256i) -> __m256i {
    _mm256_xor_si256(
        _mm256_xor_si256(rotr!(w, 7), rotr!(w, 18)),
        _mm256_srli_epi32::<3>(w),
    )
}

#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
unsafe fn small_sigma1(w: __m256i) -> __m256i {
    _mm256_xor_si256(
        _mm256_xor_si256(rotr!(w, 17), rotr!(w, 19)),
        _mm256_srli_epi32::<10>(w),
    )
}

// =============================================================================
// CORE
// =============================================================================

/// Run the 64 rounds over eight lanes and add the result into `state`.
///
/// `w` holds the first 16 message words (word `j` of every lane in `w[j]`) and is
/// expanded in place as a ring buffer.
// SAFETY: Requires AVX2 (enforced by dispatcher). Register-only operations.
#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
unsafe fn rounds(state: &mut [__m256i; 8], w: &mut [__m256i; BLOCK_WORDS]) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (i, k) in K.iter().enumerate() {
        let j = i % BLOCK_WORDS;
        if i >= BLOCK_WORDS {
            w[j] = add!(
                small_sigma1(w[(j + 14) % BLOCK_WORDS]),
                w[(j + 9) % BLOCK_WORDS],
                small_sigma0(w[(j + 1) % BLOCK_WORDS]),
                w[j]
            );
        }

        let t1 = add!(
            h,
            big_sigma1(e),
            ch(e, f, g),
            _mm256_set1_epi32(*k as i32),
            w[j]
        );
        let t2 = _mm256_add_epi32(big_sigma0(a), maj(a, b, c));
        h = g;
        g = f;
        f = e;
        e = _mm256_add_epi32(d, t1);
        d = c;
        c = b;
        b = a;
        a = _mm256_add_epi32(t1, t2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s = _mm256_add_epi32(*s, v);
    }
}

/// Load the word-major state into eight registers.
// SAFETY: Requires AVX2. `State` is 64 words = eight 32-byte rows.
#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
unsafe fn load_state(state: &State) -> [__m256i; 8] {
    let ptr = state.as_ptr().cast::<__m256i>();
    let mut regs = [_mm256_setzero_si256(); 8];
    for (i, reg) in regs.iter_mut().enumerate() {
        *reg = _mm256_loadu_si256(ptr.add(i));
    }
    regs
}

/// Write eight registers back as word-major state.
// SAFETY: Requires AVX2. `State` is 64 words = eight 32-byte rows.
#[inline]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
unsafe fn store_state(state: &mut State, regs: &[__m256i; 8]) {
    let ptr = state.as_mut_ptr().cast::<__m256i>();
    for (i, reg) in regs.iter().enumerate() {
        _mm256_storeu_si256(ptr.add(i), *reg);
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Absorb `blocks` consecutive blocks from each of the eight lane slices.
///
/// # Safety
/// Requires AVX2, and every lane slice must hold at least `blocks * 64` bytes.
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub unsafe fn compress_lanes(state: &mut State, lanes: &[&[u8]; LANES], blocks: usize) {
    let mask = byteswap_mask();
    let mut s = load_state(state);

    for block in 0..blocks {
        let offset = block * BLOCK_SIZE;

        // Row `l` = lane `l` words 0..7 (lo) and 8..15 (hi), byte-swapped to big-endian
        let mut lo = [_mm256_setzero_si256(); 8];
        let mut hi = [_mm256_setzero_si256(); 8];
        for (l, lane) in lanes.iter().enumerate() {
            let ptr = lane.as_ptr().add(offset).cast::<__m256i>();
            lo[l] = _mm256_shuffle_epi8(_mm256_loadu_si256(ptr), mask);
            hi[l] = _mm256_shuffle_epi8(_mm256_loadu_si256(ptr.add(1)), mask);
        }

        // Word-major: register `j` = message word `j` of all lanes
        transpose8(&mut lo);
        transpose8(&mut hi);

        let mut w = [_mm256_setzero_si256(); BLOCK_WORDS];
        w[..8].copy_from_slice(&lo);
        w[8..].copy_from_slice(&hi);

        rounds(&mut s, &mut w);
    }

    store_state(state, &s);
}

/// Absorb one block per lane from the interleaved 512-byte buffer.
///
/// # Safety
/// Requires AVX2.
#[target_feature(enable = "avx2")]
#[allow(unsafe_code)]
pub unsafe fn compress_interleaved(state: &mut State, block: &[u8; INTERLEAVED_BLOCK_SIZE]) {
    let mask = byteswap_mask();
    let ptr = block.as_ptr().cast::<__m256i>();

    // Already word-major: one load per message word
    let mut w = [_mm256_setzero_si256(); BLOCK_WORDS];
    for (j, word) in w.iter_mut().enumerate() {
        *word = _mm256_shuffle_epi8(_mm256_loadu_si256(ptr.add(j)), mask);
    }

    let mut s = load_state(state);
    rounds(&mut s, &mut w);
    store_state(state, &s);
}
