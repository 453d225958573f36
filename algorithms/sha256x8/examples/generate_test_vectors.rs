//! Generator for SHA256x8 test vectors
//!
//! Generates the canonical JSON test vectors used by `tests/test_vectors.json`.
//! Digests come from the independent `sha2` crate, never from this library.
#![allow(clippy::unwrap_used)]
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Serialize)]
struct Vector {
    name: &'static str,
    input: &'static str,
    hash: String,
}

#[derive(Serialize)]
struct TestVectors {
    vectors: Vec<Vector>,
}

fn vector(name: &'static str, input: &'static str, bytes: &[u8]) -> Vector {
    Vector {
        name,
        input,
        hash: hex::encode(Sha256::digest(bytes)),
    }
}

fn main() {
    let mut vectors = Vec::new();

    // =========================================================================
    // 1. FIPS 180-4 / NIST VECTORS
    // =========================================================================

    for (name, input) in [
        ("empty", ""),
        ("abc", "abc"),
        ("nist-448", "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
        (
            "nist-896",
            "abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu",
        ),
        ("quick-fox", "The quick brown fox jumps over the lazy dog"),
    ] {
        vectors.push(vector(name, input, input.as_bytes()));
    }

    // =========================================================================
    // 2. BOUNDARY CONDITIONS
    // =========================================================================

    // Named inputs are expanded by the test harness.
    vectors.push(vector("million-a", "MILLION_A", &vec![b'a'; 1_000_000]));
    vectors.push(vector("exact-block", "EXACT_64_ZERO", &[0u8; 64]));
    vectors.push(vector("pad-fits", "PAD_55_A", &[b'a'; 55]));
    vectors.push(vector("pad-spills", "PAD_56_A", &[b'a'; 56]));
    vectors.push(vector("unaligned-63", "UNALIGNED_63_TWO", &[2u8; 63]));
    vectors.push(vector("large-1kb", "LARGE_1KB", &[b'A'; 1024]));

    println!(
        "{}",
        serde_json::to_string_pretty(&TestVectors { vectors }).unwrap()
    );
}
