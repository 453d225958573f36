//! Scalar SHA-256 compression function (FIPS 180-4, §6.2.2).

use crate::kernels::constants::{BLOCK_SIZE, BLOCK_WORDS, K, STATE_WORDS};

// =============================================================================
// ROUND FUNCTIONS
// =============================================================================

#[inline(always)]
const fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

#[inline(always)]
const fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

#[inline(always)]
const fn big_sigma0(a: u32) -> u32 {
    a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22)
}

#[inline(always)]
const fn big_sigma1(e: u32) -> u32 {
    e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25)
}

#[inline(always)]
const fn small_sigma0(w: u32) -> u32 {
    w.rotate_right(7) ^ w.rotate_right(18) ^ (w >> 3)
}

#[inline(always)]
const fn small_sigma1(w: u32) -> u32 {
    w.rotate_right(17) ^ w.rotate_right(19) ^ (w >> 10)
}

// =============================================================================
// COMPRESSION
// =============================================================================

/// Absorb 16 already-decoded message words into one lane's chaining state.
pub fn compress_words(state: &mut [u32; STATE_WORDS], message: &[u32; BLOCK_WORDS]) {
    let mut w = [0u32; 64];
    w[..BLOCK_WORDS].copy_from_slice(message);
    for i in BLOCK_WORDS..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (k, w) in K.iter().zip(w.iter()) {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(*k)
            .wrapping_add(*w);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s = s.wrapping_add(v);
    }
}

/// Absorb one 64-byte block into one lane's chaining state.
pub fn compress_block(state: &mut [u32; STATE_WORDS], block: &[u8; BLOCK_SIZE]) {
    let (words, _) = block.as_chunks::<4>();
    let mut message = [0u32; BLOCK_WORDS];
    for (m, bytes) in message.iter_mut().zip(words) {
        *m = u32::from_be_bytes(*bytes);
    }
    compress_words(state, &message);
}
