use bolero::check;
use sha256x8::{digest_all, digest_one, Backend, Sha256x8, LANES};

#[test]
fn fuzz_streaming_consistency() {
    check!()
        .with_type::<(Vec<u8>, Vec<u16>)>()
        .for_each(|(data, cuts)| {
            // =============================================================================
            // BASELINE (SCALAR)
            // =============================================================================

            // Lane `l` hashes `data` with every byte rotated by `l`.
            let lanes: Vec<Vec<u8>> = (0..LANES)
                .map(|l| data.iter().map(|b| b.rotate_left(l as u32)).collect())
                .collect();
            let expected: Vec<[u8; 32]> = lanes.iter().map(|d| digest_one(d)).collect();

            // =============================================================================
            // STREAMING VARIATIONS
            // =============================================================================

            // 1. Single Update
            let single = digest_all(core::array::from_fn(|l| lanes[l].as_slice()));
            assert_eq!(single.to_vec(), expected, "Single update mismatch");

            // 2. Fuzzer-chosen split points, on every available backend
            for backend in [Backend::Portable, Backend::Avx2] {
                let Ok(mut engine) = Sha256x8::with_backend(backend) else {
                    continue;
                };
                let mut offset = 0;
                for cut in cuts {
                    let end = (offset + usize::from(*cut) % 200).min(data.len());
                    engine.update(core::array::from_fn(|l| &lanes[l][offset..end]));
                    offset = end;
                }
                engine.update(core::array::from_fn(|l| &lanes[l][offset..]));
                assert_eq!(
                    engine.finalize().to_vec(),
                    expected,
                    "Split mismatch on {backend}"
                );
            }
        });
}
