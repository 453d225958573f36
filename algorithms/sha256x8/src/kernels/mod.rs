//! Kernel Implementations
//!
//! Hardware-specific implementations of the eight-lane SHA-256 compression
//! primitive and its layout helpers.

#[cfg(target_arch = "x86_64")]
pub mod avx2;
pub mod constants;
pub mod portable;
