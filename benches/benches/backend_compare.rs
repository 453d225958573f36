//! Backend Comparison Benchmark
//!
//! Compares performance of the runtime dispatcher vs explicit AVX2 and
//! portable kernels, both through the engine and on raw compression.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use sha256x8::kernels::constants::{BLOCK_SIZE, INTERLEAVED_BLOCK_SIZE, IV_WORD_MAJOR};
use sha256x8::{kernel_for, Backend, Sha256x8, LANES};
use std::hint::black_box;

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA256x8 Backends");

    // Scenarios:
    // - Small (7B): padding-only, one block per lane
    // - Medium (1KB): L1 cache hot-path
    // - Large (256KB): bulk direct path
    let sizes = [7, 1024, 256 * 1024];

    for size in sizes {
        let input = vec![0u8; size];
        group.throughput(Throughput::Bytes((size * LANES) as u64));

        // 1. Dispatcher (Production Path)
        let dispatch = format!("Dispatch ({}) - {size} bytes", sha256x8::active_backend());
        group.bench_function(dispatch, |b| {
            b.iter(|| sha256x8::digest_all([black_box(input.as_slice()); LANES]));
        });

        // 2. Each backend explicitly
        for backend in [Backend::Avx2, Backend::Portable] {
            let Ok(engine) = Sha256x8::with_backend(backend) else {
                continue;
            };
            group.bench_function(format!("{backend} - {size} bytes"), |b| {
                b.iter(|| {
                    let mut e = engine.clone();
                    e.update([black_box(input.as_slice()); LANES]);
                    e.finalize()
                });
            });
        }
    }
    group.finish();
}

fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA256x8 Compression");
    group.throughput(Throughput::Bytes(INTERLEAVED_BLOCK_SIZE as u64));

    let block = [0x5Au8; INTERLEAVED_BLOCK_SIZE];
    let lane = [0xA5u8; BLOCK_SIZE];

    for backend in [Backend::Avx2, Backend::Portable] {
        let Ok(kernel) = kernel_for(backend) else {
            continue;
        };
        group.bench_function(format!("{backend} interleaved"), |b| {
            let mut state = IV_WORD_MAJOR;
            b.iter(|| (kernel.compress_interleaved)(&mut state, black_box(&block)));
        });
        group.bench_function(format!("{backend} lanes"), |b| {
            let mut state = IV_WORD_MAJOR;
            let lanes = [lane.as_slice(); LANES];
            b.iter(|| (kernel.compress_lanes)(&mut state, black_box(&lanes), 1));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_backends, bench_compression);
criterion_main!(benches);
