#![cfg_attr(not(feature = "std"), no_std)]

//! # SHA256x8
//!
//! Eight independent SHA-256 computations in lock-step.
//! Accelerated by AVX2, with a portable fallback producing identical digests.

//! # Usage
//! ```rust
//! use sha256x8::Sha256x8;
//!
//! // 1. Eight equal-length messages at once
//! let inputs: [&[u8]; 8] = [b"msg-0", b"msg-1", b"msg-2", b"msg-3",
//!                           b"msg-4", b"msg-5", b"msg-6", b"msg-7"];
//! let digests = sha256x8::digest_all(inputs);
//! assert_eq!(digests[5], sha256x8::digest_one(b"msg-5"));
//!
//! // 2. Streaming
//! let mut engine = Sha256x8::new();
//! engine.update([b"Chunk 1".as_slice(); 8]);
//! engine.update([b"Chunk 2".as_slice(); 8]);
//! let digests = engine.finalize();
//! assert_eq!(digests[0], sha256x8::digest_one(b"Chunk 1Chunk 2"));
//!
//! // 3. Any number of inputs of any lengths
//! let files = vec![vec![1u8; 10], vec![2u8; 3000], vec![3u8; 10]];
//! let digests = sha256x8::digest_many(&files);
//! assert_eq!(digests[1], sha256x8::digest_one(&files[1]));
//! ```

// =============================================================================
// MODULES
// =============================================================================

#[cfg(not(feature = "std"))]
extern crate alloc;

mod engine;
// Internal kernels, public for benchmarks and cross-backend tests only
#[doc(hidden)]
pub mod kernels;
mod oneshot;
mod streaming;
pub(crate) mod types;

// =============================================================================
// EXPORTS
// =============================================================================

#[cfg(feature = "digest-trait")]
pub use digest;
pub use engine::dispatcher::FORCE_PORTABLE_ENV;
#[doc(hidden)]
pub use engine::parallel::BatchPlan;
pub use engine::parallel::digest_many;
pub use engine::{active_backend, available, kernel_for};
pub use kernels::constants::{BLOCK_SIZE, DIGEST_SIZE, LANES};
pub use kernels::portable::Sha256;
pub use oneshot::{digest_all, digest_all_into, digest_one, try_digest_all, verify_all};
pub use streaming::Sha256x8;
pub use types::{Backend, CpuFeatureError, Digest, Kernel, LaneLengthError, State};
