#![no_main]

use libfuzzer_sys::fuzz_target;
use sha256x8::{digest_one, Sha256x8, LANES};

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    // First byte picks the chunk size; lane `l` sees the rest XORed with `l`.
    let Some((&chunk, msg)) = data.split_first() else {
        return;
    };
    let chunk = usize::from(chunk) + 1;
    let lanes: Vec<Vec<u8>> = (0..LANES)
        .map(|l| msg.iter().map(|b| b ^ l as u8).collect())
        .collect();

    // =============================================================================
    // 1. CHUNKED STREAMING
    // =============================================================================

    let mut engine = Sha256x8::new();
    let mut offset = 0;
    while offset < msg.len() {
        let end = (offset + chunk).min(msg.len());
        engine.update(core::array::from_fn(|l| &lanes[l][offset..end]));
        offset = end;
    }
    let digests = engine.finalize();

    // =============================================================================
    // 2. SCALAR REFERENCE
    // =============================================================================

    for (lane, digest) in digests.iter().enumerate() {
        assert_eq!(*digest, digest_one(&lanes[lane]), "Lane {lane} mismatch");
    }
});
