//! Integration Tests
//!
//! Verifies the public API of the SHA256x8 library.
//! Known digests, lane isolation, checked entry points and batch ordering.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use sha256x8::{Backend, LaneLengthError, Sha256x8, LANES};

const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// SHA-256 of the single byte `i`, for `i` in 0..8.
const SINGLE_BYTE: [&str; LANES] = [
    "6e340b9cffb37a989ca544e6bb780a2c78901d3fb33738768511a30617afa01d",
    "4bf5122f344554c53bde2ebb8cd2b7e3d1600ad631c385a5d7cce23c7785459a",
    "dbc1b4c900ffe48d575b5da5c638040125f65db0fe3e24494b76ea986457d986",
    "084fed08b978af4d7d196a7446a86b58009e636b611db16211b65a9aadff29c5",
    "e52d9c508c502347344d8c07ad91cbd6068afc75ff6292f062a09ca381c89e71",
    "e77b9a9ae9e30b0dbdb6f510a264ef9de781501d7b6b92ae89eb059c5ab743db",
    "67586e98fad27da0b9968bc039a1ef34c939b9b8e523a8bef89d478608c5ecf6",
    "ca358758f6d27e6cf45272937977a748fd88391db679ceda7dc7bf1f005ee879",
];

fn engines() -> Vec<Sha256x8> {
    [Backend::Portable, Backend::Avx2]
        .into_iter()
        .filter_map(|b| Sha256x8::with_backend(b).ok())
        .collect()
}

// =============================================================================
// KNOWN DIGESTS
// =============================================================================

#[test]
fn test_empty_input() {
    for engine in engines() {
        let backend = engine.backend();
        for (lane, digest) in engine.finalize().iter().enumerate() {
            assert_eq!(hex::encode(digest), EMPTY, "{backend} lane {lane}");
        }
    }
}

#[test]
fn test_single_byte_per_lane() {
    let bytes: [[u8; 1]; LANES] = core::array::from_fn(|i| [i as u8]);
    for mut engine in engines() {
        let backend = engine.backend();
        engine.update(core::array::from_fn(|l| &bytes[l][..]));
        for (lane, digest) in engine.finalize().iter().enumerate() {
            assert_eq!(hex::encode(digest), SINGLE_BYTE[lane], "{backend} lane {lane}");
        }
    }
}

#[test]
fn test_backend_reporting() {
    let backend = sha256x8::active_backend();
    println!("Hardware backend: {backend}");
    assert_eq!(Sha256x8::new().backend(), backend);
    if !sha256x8::available() {
        assert_eq!(backend, Backend::Portable);
    }
}

// =============================================================================
// STREAMING
// =============================================================================

#[test]
fn test_streaming_matches_oneshot() {
    let data: Vec<[u8; 300]> = (0..LANES)
        .map(|l| core::array::from_fn(|p| (p * 3 + l * 101) as u8))
        .collect();
    let expected = sha256x8::digest_all(core::array::from_fn(|l| &data[l][..]));

    // Chunk sizes chosen to straddle block boundaries at shifting offsets.
    for mut engine in engines() {
        let mut offset = 0;
        for size in [1usize, 63, 2, 64, 65, 0, 7, 98] {
            engine.update(core::array::from_fn(|l| &data[l][offset..offset + size]));
            offset += size;
        }
        assert_eq!(offset, 300);
        assert_eq!(engine.len(), 300);
        assert_eq!(engine.finalize(), expected);
    }
}

#[test]
fn test_lanes_are_independent() {
    // Identical data except for one lane must only change that lane's digest.
    let base = [0x5Au8; 130];
    let mut tweaked = base;
    tweaked[129] ^= 1;

    let mut inputs: [&[u8]; LANES] = [&base; LANES];
    let reference = sha256x8::digest_all(inputs);
    inputs[3] = &tweaked;
    let digests = sha256x8::digest_all(inputs);

    for lane in 0..LANES {
        if lane == 3 {
            assert_ne!(digests[lane], reference[lane]);
        } else {
            assert_eq!(digests[lane], reference[lane], "lane {lane} leaked");
        }
    }
}

#[test]
fn test_clone_forks_state() {
    let mut engine = Sha256x8::new();
    engine.update([b"shared prefix ".as_slice(); LANES]);
    let mut fork = engine.clone();

    engine.update([b"left".as_slice(); LANES]);
    fork.update([b"right".as_slice(); LANES]);

    assert_eq!(engine.finalize()[0], sha256x8::digest_one(b"shared prefix left"));
    assert_eq!(fork.finalize()[0], sha256x8::digest_one(b"shared prefix right"));
}

#[test]
fn test_reset_discards_input() {
    let mut engine = Sha256x8::new();
    engine.update([b"discarded".as_slice(); LANES]);
    engine.reset();
    assert!(engine.is_empty());
    for digest in engine.finalize() {
        assert_eq!(hex::encode(digest), EMPTY);
    }
}

// =============================================================================
// CHECKED ENTRY POINTS
// =============================================================================

#[test]
fn test_try_digest_all_rejects_ragged_input() {
    let mut inputs: [&[u8]; LANES] = [b"four"; LANES];
    inputs[6] = b"five!";
    let err = sha256x8::try_digest_all(inputs).unwrap_err();
    assert_eq!(err.lane(), 6);
    assert_eq!(err.expected(), 4);
    assert_eq!(err.actual(), 5);
    assert!(err.to_string().contains("lane 6"));

    inputs[6] = b"four";
    assert!(sha256x8::try_digest_all(inputs).is_ok());
}

#[test]
fn test_try_update_reports_first_bad_lane() {
    let mut engine = Sha256x8::new();
    let mut inputs: [&[u8]; LANES] = [b"xy"; LANES];
    inputs[2] = b"x";
    inputs[5] = b"";
    let err: LaneLengthError = engine.try_update(inputs).unwrap_err();
    assert_eq!(err.lane(), 2);
}

#[test]
fn test_verify_all() {
    let inputs = [b"Secure Data".as_slice(); LANES];
    let mut expected = sha256x8::digest_all(inputs);
    assert_eq!(sha256x8::verify_all(inputs, &expected), [true; LANES]);

    expected[0][31] ^= 0xFF;
    expected[7][0] ^= 0x01;
    let ok = sha256x8::verify_all(inputs, &expected);
    assert_eq!(ok, [false, true, true, true, true, true, true, false]);
}

#[test]
fn test_digest_all_into() {
    let inputs = [b"into".as_slice(); LANES];
    let mut out = [[0u8; 32]; LANES];
    sha256x8::digest_all_into(inputs, &mut out);
    assert_eq!(out, sha256x8::digest_all(inputs));
}

// =============================================================================
// BATCH API
// =============================================================================

#[test]
fn test_digest_many_preserves_order() {
    // Mixed lengths: 17 inputs of length 40 (two full groups + 1), assorted others.
    let mut inputs: Vec<Vec<u8>> = Vec::new();
    for i in 0..40u8 {
        let len = match i % 3 {
            0 | 1 => 40,
            _ => usize::from(i) * 13,
        };
        inputs.push(vec![i; len]);
    }

    let digests = sha256x8::digest_many(&inputs);
    assert_eq!(digests.len(), inputs.len());
    for (i, (input, digest)) in inputs.iter().zip(&digests).enumerate() {
        assert_eq!(*digest, sha256x8::digest_one(input), "input {i}");
    }
}

#[test]
fn test_digest_many_empty() {
    let inputs: Vec<&[u8]> = Vec::new();
    assert!(sha256x8::digest_many(&inputs).is_empty());
}
