//! Modification-time staleness check for incremental builds.
//!
//! Encoding is the expensive part of a run, so a candidate is only
//! re-encoded when at least one of its expected outputs is missing or older
//! than the source. The outputs' mtimes are the only state carried between
//! runs; there is no manifest file.
//!
//! Because the check is mtime-based, tools that reset modification times
//! (e.g. a fresh `git checkout`) make sources look newer and trigger a full
//! re-encode. That costs time, never correctness.

use std::io;
use std::path::Path;

/// True if any expected output is missing or strictly older than the source.
///
/// An empty `outputs` list is never stale: there is nothing to produce.
/// Errors reading the source's metadata are returned to the caller; an
/// output whose metadata can't be read counts as missing.
pub fn needs_processing(source: &Path, outputs: &[impl AsRef<Path>]) -> io::Result<bool> {
    if outputs.is_empty() {
        return Ok(false);
    }
    let source_mtime = std::fs::metadata(source)?.modified()?;

    Ok(outputs.iter().any(|output| {
        match std::fs::metadata(output.as_ref()).and_then(|m| m.modified()) {
            Ok(output_mtime) => source_mtime > output_mtime,
            Err(_) => true,
        }
    }))
}
