//! SHA256x8 Basic Example
//!
//! Minimal usage: `let digests = sha256x8::digest_all(inputs);`

#![allow(clippy::pedantic, clippy::nursery)]

fn main() {
    let inputs: [&[u8]; 8] = [
        b"alpha", b"bravo", b"charl", b"delta", b"echo!", b"foxtr", b"golf!", b"hotel",
    ];
    let digests = sha256x8::digest_all(inputs);

    println!("Backend: {}", sha256x8::active_backend());
    for (data, digest) in inputs.iter().zip(&digests) {
        println!("{}  {:?}", hex::encode(digest), String::from_utf8_lossy(data));
    }
}
