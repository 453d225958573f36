//! AVX2 Kernel Module
//!
//! Eight-lane SHA-256 on 256-bit YMM registers.

mod compress;
mod layout;

pub use compress::{compress_interleaved, compress_lanes};
pub use layout::{byteswap, transpose};
