//! Hash Command
//!
//! File hashing in groups of eight equal-size files, one engine per group.
//! Groups and leftover files are spread over the Rayon pool.

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use rayon::prelude::*;
use sha256x8::{Backend, BatchPlan, Digest, Sha256, Sha256x8, LANES};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read granularity per file.
const CHUNK_SIZE: usize = 128 * 1024;

/// Kernel selection from the command line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum BackendChoice {
    /// Fastest backend this CPU supports
    Auto,
    /// AVX2 (fails if the CPU lacks it)
    Avx2,
    /// Portable scalar kernel
    Portable,
}

impl BackendChoice {
    fn engine(self) -> Result<Sha256x8> {
        let engine = match self {
            Self::Auto => Sha256x8::new(),
            Self::Avx2 => Sha256x8::with_backend(Backend::Avx2)?,
            Self::Portable => Sha256x8::with_backend(Backend::Portable)?,
        };
        Ok(engine)
    }
}

// =============================================================================
// BATCHED HASHING
// =============================================================================

/// Digest every file, results in input order.
pub fn digest_files(files: &[PathBuf], backend: BackendChoice) -> Vec<Result<Digest>> {
    // Fail early on an unusable backend rather than once per group.
    if let Err(e) = backend.engine() {
        let msg = format!("{e:#}");
        return files.iter().map(|_| Err(anyhow!("{msg}"))).collect();
    }

    let sizes: Vec<Result<u64>> = files
        .par_iter()
        .map(|path| {
            std::fs::metadata(path)
                .map(|m| m.len())
                .with_context(|| format!("Failed to open: {}", path.display()))
        })
        .collect();

    let readable: Vec<(usize, u64)> = sizes
        .iter()
        .enumerate()
        .filter_map(|(i, size)| size.as_ref().ok().map(|&s| (i, s)))
        .collect();
    let lengths: Vec<u64> = readable.iter().map(|&(_, size)| size).collect();
    let plan = BatchPlan::new(&lengths);
    let file_index = |k: usize| readable[k].0;
    let groups: Vec<[usize; LANES]> = plan.groups.iter().map(|g| g.map(file_index)).collect();
    let singles: Vec<usize> = plan.singles.iter().map(|&k| file_index(k)).collect();
    tracing::info!(
        files = files.len(),
        groups = groups.len(),
        singles = singles.len(),
        "hashing"
    );

    let grouped = groups.par_iter().flat_map_iter(|group| {
        let paths: [&Path; LANES] = core::array::from_fn(|l| files[group[l]].as_path());
        group.iter().copied().zip(hash_group(paths, backend))
    });
    let single = singles
        .par_iter()
        .map(|&i| (i, hash_single(&files[i])));
    let hashed: Vec<(usize, Result<Digest>)> = grouped.chain(single).collect();

    let mut slots: Vec<Option<Result<Digest>>> = sizes
        .into_iter()
        .map(|size| size.err().map(Err))
        .collect();
    for (i, result) in hashed {
        slots[i] = Some(result);
    }
    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err(anyhow!("file was never scheduled"))))
        .collect()
}

/// A lock-step group that could not finish.
struct GroupError {
    /// Lane at fault, `None` when no single file is to blame.
    lane: Option<usize>,
    error: anyhow::Error,
}

/// Hash eight files of equal size, one result per lane.
///
/// If the lock-step pass fails, the failing lane keeps its error and every
/// other lane is hashed again on its own.
fn hash_group(paths: [&Path; LANES], backend: BackendChoice) -> [Result<Digest>; LANES] {
    match hash_lockstep(paths, backend) {
        Ok(digests) => digests.map(Ok),
        Err(GroupError { lane, error }) => {
            tracing::warn!(
                ?lane,
                error = %format!("{error:#}"),
                "group failed, hashing lanes separately"
            );
            let mut error = Some(error);
            core::array::from_fn(|l| match error.take_if(|_| lane == Some(l)) {
                Some(e) => Err(e),
                None => hash_single(paths[l]),
            })
        }
    }
}

/// Stream eight files through one engine.
fn hash_lockstep(
    paths: [&Path; LANES],
    backend: BackendChoice,
) -> std::result::Result<[Digest; LANES], GroupError> {
    let mut readers = Vec::with_capacity(LANES);
    for (lane, path) in paths.iter().enumerate() {
        let file = File::open(path)
            .with_context(|| format!("Failed to open: {}", path.display()))
            .map_err(|error| GroupError { lane: Some(lane), error })?;
        readers.push(file);
    }

    let mut engine = backend
        .engine()
        .map_err(|error| GroupError { lane: None, error })?;
    let mut buffers = vec![[0u8; CHUNK_SIZE]; LANES];

    loop {
        let mut filled = [0usize; LANES];
        let lanes = readers.iter_mut().zip(buffers.iter_mut()).zip(&mut filled);
        for (lane, ((reader, buffer), n)) in lanes.enumerate() {
            *n = read_full(reader, buffer)
                .with_context(|| format!("Failed to read: {}", paths[lane].display()))
                .map_err(|error| GroupError { lane: Some(lane), error })?;
        }
        if filled.iter().any(|&n| n != filled[0]) {
            return Err(GroupError {
                lane: None,
                error: anyhow!("files changed size while hashing"),
            });
        }
        let n = filled[0];
        if n == 0 {
            break;
        }
        engine.update(core::array::from_fn(|l| &buffers[l][..n]));
    }

    Ok(engine.finalize())
}

/// Hash one file on the scalar path.
fn hash_single(path: &Path) -> Result<Digest> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let n = file
            .read(&mut buffer)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hasher.finalize())
}

/// Fill `buffer` unless EOF comes first. Returns the bytes read.
fn read_full(reader: &mut impl Read, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

// =============================================================================
// COMMAND
// =============================================================================

/// Hash files and print `sha256sum`-style lines in argument order.
pub fn hash_files(files: &[PathBuf], backend: BackendChoice) -> Result<()> {
    let mut errors = Vec::new();

    for (file_path, result) in files.iter().zip(digest_files(files, backend)) {
        match result {
            Ok(digest) => println!("{}  {}", hex::encode(digest), file_path.display()),
            Err(e) => errors.push((file_path, e)),
        }
    }

    for (file_path, error) in &errors {
        eprintln!("Error: {}: {}", file_path.display(), error);
    }

    if !errors.is_empty() {
        bail!("Failed to hash {} file(s)", errors.len());
    }

    Ok(())
}
