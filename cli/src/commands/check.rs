//! Check Command
//!
//! Verify checksums from file (like sha256sum -c).

use super::hash::{digest_files, BackendChoice};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

// =============================================================================
// PARSING
// =============================================================================

/// One `hash  filename` line.
#[derive(Debug, PartialEq, Eq)]
struct Entry {
    expected: String,
    path: PathBuf,
}

/// Parse a checksum line. Blank lines and `#` comments yield `None`.
fn parse_line(line: &str) -> Option<std::result::Result<Entry, String>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    // Format: "hash  filename" (two spaces)
    let Some((hash, path)) = line.split_once("  ") else {
        return Some(Err(line.to_owned()));
    };
    Some(Ok(Entry {
        expected: hash.trim().to_ascii_lowercase(),
        path: PathBuf::from(path.trim()),
    }))
}

// =============================================================================
// CHECK
// =============================================================================

/// Verify checksums from a checksum file.
pub fn check_mode(checksum_file: &Path, backend: BackendChoice) -> Result<()> {
    let file = File::open(checksum_file)
        .with_context(|| format!("Failed to open: {}", checksum_file.display()))?;

    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        match parse_line(&line?) {
            Some(Ok(entry)) => entries.push(entry),
            Some(Err(bad)) => eprintln!("Warning: Invalid format: {bad}"),
            None => {}
        }
    }

    if entries.is_empty() {
        bail!(
            "{}: no properly formatted checksum lines found",
            checksum_file.display()
        );
    }

    let paths: Vec<PathBuf> = entries.iter().map(|e| e.path.clone()).collect();
    let results = digest_files(&paths, backend);

    let total = entries.len();
    let mut failed = 0;
    for (entry, result) in entries.iter().zip(results) {
        let path = entry.path.display();
        match result {
            Ok(digest) if hex::encode(digest) == entry.expected => println!("{path}: OK"),
            Ok(_) => {
                println!("{path}: FAILED");
                failed += 1;
            }
            Err(e) => {
                println!("{path}: FAILED ({e:#})");
                failed += 1;
            }
        }
    }

    println!();
    if failed == 0 {
        println!("All {total} checksums verified");
    } else {
        eprintln!("WARNING: {failed} of {total} checksums did NOT match");
        std::process::exit(1);
    }

    Ok(())
}
