//! # webp-images
//!
//! Converts a static site's source images into WebP: one full-resolution
//! re-encode plus a set of narrower responsive variants per image. Meant to
//! run as a build step; the site generator calls [`run`] once per build.
//!
//! # Pipeline
//!
//! ```text
//! Settings ──► WebpConfig ──► walk source dir ──► filter ──► stale? ──► decode/resize/encode
//!  (host)       (config)        (scan)          (filter)  (staleness)     (imaging, process)
//! ```
//!
//! Single pass, single thread. Each image is handled independently: a bad
//! file is logged and skipped, and the build carries on.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Host settings lookup and the typed [`WebpConfig`] |
//! | [`filter`] | Which files are candidates (extension, skip dirs, variant suffix) |
//! | [`naming`] | `name.webp` / `name-{w}.webp` output filenames |
//! | [`staleness`] | mtime comparison deciding whether to re-encode |
//! | [`scan`] | Recursive walk of the source directory |
//! | [`imaging`] | Backend trait, decode, colour normalisation, resize, WebP encode |
//! | [`process`] | Per-image processor and the directory-wide run |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//!
//! # Invocation Contract
//!
//! [`run`] never fails. Settings of the wrong type, an unwritable output
//! directory, or any other setup problem is logged at error level and the
//! call returns `None`; the host's build continues. A missing source
//! directory is only a warning.
//!
//! # Incremental Builds
//!
//! There is no cache manifest. Output files' modification times are the only
//! state between runs: an image is re-encoded when any of its outputs is
//! missing or older than the source.

pub mod config;
pub mod filter;
pub mod imaging;
pub mod logging;
pub mod naming;
pub mod process;
pub mod scan;
pub mod staleness;

#[cfg(test)]
pub(crate) mod test_helpers;

use thiserror::Error;

pub use config::{ConfigError, Settings, WebpConfig};
pub use imaging::{ImageBackend, RustBackend};
pub use process::{ProcessError, RunSummary, process_image, process_images};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),
}

/// Entry point for the host build: convert all images described by `settings`.
///
/// Returns the run summary, or `None` if the run could not start. Errors are
/// logged, never returned.
pub fn run(settings: &Settings) -> Option<RunSummary> {
    run_with_backend(&RustBackend::new(), settings)
}

/// [`run`] with an explicit backend.
pub fn run_with_backend(backend: &impl ImageBackend, settings: &Settings) -> Option<RunSummary> {
    match try_run(backend, settings) {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::error!("Image processing failed: {}", e);
            None
        }
    }
}

fn try_run(backend: &impl ImageBackend, settings: &Settings) -> Result<RunSummary, RunError> {
    let config = WebpConfig::from_settings(settings)?;
    Ok(process_images(backend, &config)?)
}
