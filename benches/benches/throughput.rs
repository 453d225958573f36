//! SHA256x8 Criterion Benchmark
//!
//! Eight-lane engine against eight independent scalar hashes, per message size.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use sha2::Digest as _;
use sha256x8::LANES;
use std::hint::black_box;

const KB: usize = 1024;

fn random_lanes(size: usize) -> Vec<Vec<u8>> {
    (0..LANES)
        .map(|_| {
            let mut input = vec![0u8; size];
            rand::rng().fill(&mut input[..]);
            input
        })
        .collect()
}

// =============================================================================
// BENCHMARK 1: EIGHT MESSAGES
// =============================================================================

/// Eight equal-length messages: engine vs `sha2` vs the scalar reference.
fn bench_eight_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Eight-Messages");

    let sizes = [
        (64, "64B"),
        (256, "256B"),
        (KB, "1KB"),
        (16 * KB, "16KB"),
        (256 * KB, "256KB"),
    ];

    for (size, name) in sizes {
        let data = random_lanes(size);
        let lanes: [&[u8]; LANES] = core::array::from_fn(|l| data[l].as_slice());
        group.throughput(Throughput::Bytes((size * LANES) as u64));

        group.bench_with_input(BenchmarkId::new("sha256x8", name), &lanes, |b, lanes| {
            b.iter(|| sha256x8::digest_all(black_box(*lanes)))
        });

        group.bench_with_input(BenchmarkId::new("sha2 x8", name), &lanes, |b, lanes| {
            b.iter(|| {
                black_box(lanes)
                    .iter()
                    .map(|lane| sha2::Sha256::digest(lane))
                    .collect::<Vec<_>>()
            })
        });

        group.bench_with_input(BenchmarkId::new("scalar x8", name), &lanes, |b, lanes| {
            b.iter(|| {
                black_box(lanes)
                    .iter()
                    .map(|lane| sha256x8::digest_one(lane))
                    .collect::<Vec<_>>()
            })
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: STREAMING
// =============================================================================

/// Small chunks through the buffered path vs one call on the direct path.
fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Streaming");

    let size = 64 * KB;
    let data = random_lanes(size);
    group.throughput(Throughput::Bytes((size * LANES) as u64));

    for chunk in [13, 64, 1000, size] {
        group.bench_function(BenchmarkId::new("chunk", chunk), |b| {
            b.iter(|| {
                let mut engine = sha256x8::Sha256x8::new();
                for offset in (0..size).step_by(chunk) {
                    let end = (offset + chunk).min(size);
                    engine.update(core::array::from_fn(|l| &data[l][offset..end]));
                }
                engine.finalize()
            })
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: MANY FILES
// =============================================================================

/// `digest_many` over a mixed-size corpus vs `sha2` over each input.
fn bench_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Many-Inputs");

    let mut rng = rand::rng();
    let inputs: Vec<Vec<u8>> = (0..1024)
        .map(|_| {
            let mut input = vec![0u8; [4 * KB, 16 * KB, 64 * KB][rng.random_range(0..3)]];
            rng.fill(&mut input[..]);
            input
        })
        .collect();
    let total: usize = inputs.iter().map(Vec::len).sum();
    group.throughput(Throughput::Bytes(total as u64));

    group.bench_function("digest_many", |b| {
        b.iter(|| sha256x8::digest_many(black_box(&inputs)))
    });

    #[cfg(feature = "multithread")]
    group.bench_function("sha2 (rayon)", |b| {
        use rayon::prelude::*;
        b.iter(|| {
            black_box(&inputs)
                .par_iter()
                .map(|i| sha2::Sha256::digest(i))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("sha2 (serial)", |b| {
        b.iter(|| {
            black_box(&inputs)
                .iter()
                .map(|i| sha2::Sha256::digest(i))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_eight_messages, bench_streaming, bench_many);
criterion_main!(benches);
