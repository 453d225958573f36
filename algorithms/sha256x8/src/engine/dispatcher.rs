//! Hardware Dispatcher
//!
//! Selects the fastest available kernel (AVX2 or portable) for the current CPU.
//! Detection runs once per process; the result is shared read-only.

use crate::kernels;
use crate::types::{Backend, CpuFeatureError, Kernel};

#[cfg(feature = "std")]
use std::sync::OnceLock;

/// Environment variable that forces the portable kernel when set to anything but `""` or `"0"`.
pub const FORCE_PORTABLE_ENV: &str = "SHA256X8_FORCE_PORTABLE";

// =============================================================================
// CAPABILITY QUERY
// =============================================================================

/// Returns whether the AVX2 kernel may run on this CPU.
///
/// If false, the accelerated kernel is never handed out by the dispatcher.
#[must_use]
pub fn available() -> bool {
    detect_avx2()
}

/// Runtime detection (std-only), cached for the lifetime of the process.
#[cfg(all(feature = "std", target_arch = "x86_64"))]
fn detect_avx2() -> bool {
    static AVX2: OnceLock<bool> = OnceLock::new();
    *AVX2.get_or_init(|| std::arch::is_x86_feature_detected!("avx2"))
}

/// Compile-time detection (`no_std`).
#[cfg(all(not(feature = "std"), target_arch = "x86_64"))]
const fn detect_avx2() -> bool {
    cfg!(target_feature = "avx2")
}

#[cfg(not(target_arch = "x86_64"))]
const fn detect_avx2() -> bool {
    false
}

/// Whether `FORCE_PORTABLE_ENV` requests the portable kernel. Read once.
#[cfg(feature = "std")]
fn force_portable() -> bool {
    static FORCE: OnceLock<bool> = OnceLock::new();
    *FORCE.get_or_init(|| {
        std::env::var_os(FORCE_PORTABLE_ENV).is_some_and(|v| !v.is_empty() && v != "0")
    })
}

#[cfg(not(feature = "std"))]
const fn force_portable() -> bool {
    false
}

// =============================================================================
// DISPATCHER
// =============================================================================

/// Returns the fastest kernel for this CPU, honouring `FORCE_PORTABLE_ENV`.
#[must_use]
pub fn best_kernel() -> &'static Kernel {
    #[cfg(feature = "std")]
    {
        static SELECTED: OnceLock<&'static Kernel> = OnceLock::new();
        *SELECTED.get_or_init(select_kernel)
    }
    #[cfg(not(feature = "std"))]
    {
        select_kernel()
    }
}

/// Returns the kernel for an explicitly requested backend.
///
/// # Errors
/// Returns `CpuFeatureError` if the backend needs CPU features this machine lacks.
pub fn kernel_for(backend: Backend) -> Result<&'static Kernel, CpuFeatureError> {
    match backend {
        Backend::Portable => Ok(&kernels::portable::KERNEL),
        Backend::Avx2 => accelerated().ok_or(CpuFeatureError::new("avx2")),
    }
}

/// Returns the backend `best_kernel` selects.
#[must_use]
pub fn active_backend() -> Backend {
    best_kernel().backend
}

fn select_kernel() -> &'static Kernel {
    let forced = force_portable();
    let kernel = match accelerated() {
        Some(kernel) if !forced => kernel,
        _ => &kernels::portable::KERNEL,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        backend = %kernel.backend,
        avx2 = available(),
        forced_portable = forced,
        "selected sha256x8 kernel"
    );

    kernel
}

#[cfg(target_arch = "x86_64")]
fn accelerated() -> Option<&'static Kernel> {
    available().then_some(&AVX2_KERNEL)
}

#[cfg(not(target_arch = "x86_64"))]
const fn accelerated() -> Option<&'static Kernel> {
    None
}

// =============================================================================
// WRAPPERS
// =============================================================================

/// AVX2 function table. Private: only handed out by `accelerated()` after CPUID validation.
#[cfg(target_arch = "x86_64")]
static AVX2_KERNEL: Kernel = Kernel {
    backend: Backend::Avx2,
    compress_lanes: safe_avx2_compress_lanes,
    compress_interleaved: safe_avx2_compress_interleaved,
    transpose: safe_avx2_transpose,
    byteswap: safe_avx2_byteswap,
};

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn safe_avx2_compress_lanes(
    state: &mut crate::types::State,
    lanes: &[&[u8]; kernels::constants::LANES],
    blocks: usize,
) {
    let len = blocks * kernels::constants::BLOCK_SIZE;
    let lanes: [&[u8]; kernels::constants::LANES] = core::array::from_fn(|l| &lanes[l][..len]);
    // SAFETY: Only reachable through AVX2_KERNEL, handed out after CPUID validation.
    // Every lane was re-sliced to exactly `blocks` blocks above (panics if shorter).
    unsafe { kernels::avx2::compress_lanes(state, &lanes, blocks) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn safe_avx2_compress_interleaved(
    state: &mut crate::types::State,
    block: &[u8; kernels::constants::INTERLEAVED_BLOCK_SIZE],
) {
    // SAFETY: Only reachable after CPUID validation. Fixed-size buffers.
    unsafe { kernels::avx2::compress_interleaved(state, block) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn safe_avx2_transpose(words: &mut crate::types::State) {
    // SAFETY: Only reachable after CPUID validation. Fixed-size buffer.
    unsafe { kernels::avx2::transpose(words) }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code)]
fn safe_avx2_byteswap(words: &mut [u32]) {
    assert!(
        words.len().is_multiple_of(kernels::constants::LANES),
        "byteswap requires a multiple of {} words, got {}",
        kernels::constants::LANES,
        words.len()
    );
    // SAFETY: Only reachable after CPUID validation. Length checked above.
    unsafe { kernels::avx2::byteswap(words) }
}
