//! Batch Scheduling
//!
//! Hashes any number of inputs of any lengths by packing equal-length inputs
//! into groups of eight lanes. Each group runs on its own engine, so groups are
//! independent and run in parallel via Rayon if the `multithread` feature is
//! enabled, serially otherwise. Inputs that cannot fill a group fall back to the
//! scalar reference hasher.

use crate::kernels::constants::{DIGEST_SIZE, LANES};
use crate::kernels::portable::Sha256;
use crate::oneshot::digest_all;
use crate::types::Digest;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// =============================================================================
// BATCH PLAN
// =============================================================================

/// Input indices split into full eight-lane groups and leftovers.
///
/// Shared with the CLI, which groups files by size the same way.
#[doc(hidden)]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchPlan {
    /// Eight indices with equal keys per group.
    pub groups: Vec<[usize; LANES]>,
    /// Indices left over once every key run is cut into groups.
    pub singles: Vec<usize>,
}

impl BatchPlan {
    /// Group indices into `keys` by key. Each group holds eight indices with equal keys.
    #[must_use]
    pub fn new<K: Ord>(keys: &[K]) -> Self {
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));

        let mut plan = Self::default();
        for run in order.chunk_by(|&a, &b| keys[a] == keys[b]) {
            let (groups, rest) = run.as_chunks::<LANES>();
            plan.groups.extend_from_slice(groups);
            plan.singles.extend_from_slice(rest);
        }
        plan
    }
}

// =============================================================================
// PUBLIC ENTRY
// =============================================================================

/// Compute SHA-256 digests of many inputs, returned in input order.
///
/// Inputs may have any lengths. Equal-length inputs are hashed eight at a time
/// on the vectorized engine; the rest go through the scalar reference.
///
/// # Example
/// ```rust
/// let files: Vec<Vec<u8>> = (0u8..20).map(|i| vec![i; 100]).collect();
/// let digests = sha256x8::digest_many(&files);
/// assert_eq!(digests.len(), 20);
/// assert_eq!(digests[3], sha256x8::Sha256::digest(&files[3]));
/// ```
#[must_use]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(count = inputs.len()))
)]
pub fn digest_many<T: AsRef<[u8]> + Sync>(inputs: &[T]) -> Vec<Digest> {
    let lengths: Vec<usize> = inputs.iter().map(|i| i.as_ref().len()).collect();
    let plan = BatchPlan::new(&lengths);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        groups = plan.groups.len(),
        singles = plan.singles.len(),
        "planned sha256x8 batches"
    );

    // 1. Eight-lane groups
    let grouped: Vec<[Digest; LANES]> = plan.groups.as_slice().process_each(|group| {
        digest_all(core::array::from_fn(|l| inputs[group[l]].as_ref()))
    });

    // 2. Leftovers
    let single: Vec<Digest> = plan
        .singles
        .as_slice()
        .process_each(|&i| Sha256::digest(inputs[i].as_ref()));

    // 3. Scatter back into input order
    let mut out = vec![[0u8; DIGEST_SIZE]; inputs.len()];
    for (group, digests) in plan.groups.iter().zip(grouped) {
        for (&i, digest) in group.iter().zip(digests) {
            out[i] = digest;
        }
    }
    for (&i, digest) in plan.singles.iter().zip(single) {
        out[i] = digest;
    }
    out
}

/// Helper for feature-agnostic batch processing
trait BatchProcessor<I> {
    fn process_each<F, R>(self, f: F) -> Vec<R>
    where
        F: Fn(&I) -> R + Sync + Send,
        R: Send;
}

impl<I: Sync> BatchProcessor<I> for &[I] {
    fn process_each<F, R>(self, f: F) -> Vec<R>
    where
        F: Fn(&I) -> R + Sync + Send,
        R: Send,
    {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            self.par_iter().map(f).collect()
        }
        #[cfg(not(feature = "multithread"))]
        {
            self.iter().map(f).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_groups_equal_lengths() {
        // Nine inputs of length 5 and three of length 7.
        let mut lengths = [5usize; 12];
        lengths[2] = 7;
        lengths[6] = 7;
        lengths[11] = 7;

        let plan = BatchPlan::new(&lengths);
        assert_eq!(plan.groups.len(), 1);
        assert_eq!(plan.singles.len(), 4);
        for group in &plan.groups {
            assert!(group.iter().all(|&i| lengths[i] == 5));
        }

        let mut seen: Vec<usize> = plan.groups.iter().flatten().copied().collect();
        seen.extend(&plan.singles);
        seen.sort_unstable();
        assert_eq!(seen, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_plan_empty() {
        assert_eq!(BatchPlan::new::<usize>(&[]), BatchPlan::default());
    }
}
