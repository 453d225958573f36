#![no_main]

use libfuzzer_sys::fuzz_target;
use sha256x8::{kernel_for, Backend};

fuzz_target!(|data: &[u8]| {
    let Ok(fast) = kernel_for(Backend::Avx2) else {
        return;
    };
    let Ok(slow) = kernel_for(Backend::Portable) else {
        return;
    };

    // =============================================================================
    // 1. MULTI-BLOCK COMPRESSION
    // =============================================================================

    // Eight lanes cut from the input, as many whole blocks as fit.
    let lane_len = data.len() / 8;
    let blocks = lane_len / 64;
    let lanes: [&[u8]; 8] = core::array::from_fn(|l| &data[l * lane_len..(l + 1) * lane_len]);

    let mut a = sha256x8::kernels::constants::IV_WORD_MAJOR;
    let mut b = a;
    (fast.compress_lanes)(&mut a, &lanes, blocks);
    (slow.compress_lanes)(&mut b, &lanes, blocks);
    assert_eq!(a, b, "compress_lanes diverged");

    // =============================================================================
    // 2. LAYOUT PRIMITIVES
    // =============================================================================

    let words: Vec<u32> = data
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let usable = words.len() / 8 * 8;
    let (mut x, mut y) = (words[..usable].to_vec(), words[..usable].to_vec());
    (fast.byteswap)(&mut x);
    (slow.byteswap)(&mut y);
    assert_eq!(x, y, "byteswap diverged");
});
