//! Per-image conversion and the directory-wide run.
//!
//! For each candidate under the source directory, writes into the mirrored
//! location under the output directory:
//!
//! ```text
//! portfolio/static/images/          output/static/images/
//! ├── dawn.jpg          ──────►     ├── dawn.webp          # original
//! │                                 ├── dawn-300.webp      # responsive
//! │                                 ├── dawn-600.webp
//! │                                 └── dawn-1200.webp
//! ├── travel/                       └── travel/
//! │   └── rome.png      ──────►         ├── rome.webp
//! │                                     └── rome-300.webp  # 400px wide: no 600/1200
//! └── thumbnails/                   (skipped)
//! ```
//!
//! ## Failure Model
//!
//! Failures are contained per image: a corrupt source, an encoder rejection,
//! or a write error is logged with the path and counts as zero outputs. The
//! run moves on to the next candidate. Nothing is retried; a failed image is
//! still stale on the next run and gets another attempt then.
//!
//! ## Incremental Runs
//!
//! Outputs are planned from the source's header dimensions before any pixel
//! work. If every planned output exists and is at least as new as the source
//! (see [`crate::staleness`]), the image is not decoded at all.

use crate::config::WebpConfig;
use crate::imaging::{
    BackendError, ImageBackend, OutputConfig, Quality, get_dimensions, load_source, plan_outputs,
    write_target,
};
use crate::scan;
use crate::staleness::needs_processing;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("{0} is not under the source directory")]
    OutsideSource(PathBuf),
    #[error("File name is not valid UTF-8: {0}")]
    InvalidFileName(PathBuf),
}

/// What happened to one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Outputs were written; carries how many.
    Written(usize),
    /// Every planned output was already fresh.
    UpToDate,
    /// Processing failed and was logged.
    Failed,
}

impl ImageOutcome {
    /// Number of files written for this image.
    pub fn written(self) -> usize {
        match self {
            Self::Written(n) => n,
            Self::UpToDate | Self::Failed => 0,
        }
    }
}

/// Totals for a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Candidate source images seen.
    pub candidates: usize,
    /// WebP files written across all candidates.
    pub variants: usize,
    pub up_to_date: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: ImageOutcome) {
        self.candidates += 1;
        match outcome {
            ImageOutcome::Written(n) => self.variants += n,
            ImageOutcome::UpToDate => self.up_to_date += 1,
            ImageOutcome::Failed => self.failed += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} image variants from {} source images",
            self.variants, self.candidates
        )?;
        if self.up_to_date > 0 {
            write!(f, ", {} up to date", self.up_to_date)?;
        }
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        Ok(())
    }
}

fn output_config(config: &WebpConfig) -> OutputConfig {
    OutputConfig {
        widths: config.responsive_widths.clone(),
        quality: Quality::new(config.quality),
        include_original: config.process_original,
    }
}

/// Convert one candidate, containing any failure.
///
/// Returns the number of files written: 0 when the outputs were already
/// fresh or when processing failed (the failure is logged).
pub fn process_image(backend: &impl ImageBackend, source: &Path, config: &WebpConfig) -> usize {
    process_image_outcome(backend, source, config).written()
}

/// Like [`process_image`], but distinguishes up-to-date from failed.
pub fn process_image_outcome(
    backend: &impl ImageBackend,
    source: &Path,
    config: &WebpConfig,
) -> ImageOutcome {
    match try_process_image(backend, source, config) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Error processing {}: {}", source.display(), e);
            ImageOutcome::Failed
        }
    }
}

fn try_process_image(
    backend: &impl ImageBackend,
    source: &Path,
    config: &WebpConfig,
) -> Result<ImageOutcome, ProcessError> {
    let relative = source
        .strip_prefix(&config.source_dir)
        .map_err(|_| ProcessError::OutsideSource(source.to_path_buf()))?;
    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ProcessError::InvalidFileName(source.to_path_buf()))?;
    let target_dir = match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => config.output_dir.join(parent),
        _ => config.output_dir.clone(),
    };

    let dimensions = get_dimensions(backend, source)?;
    let out_config = output_config(config);
    let targets = plan_outputs(&target_dir, stem, dimensions, &out_config);

    std::fs::create_dir_all(&target_dir)?;

    let paths: Vec<&Path> = targets.iter().map(|t| t.path.as_path()).collect();
    if !needs_processing(source, paths.as_slice())? {
        tracing::debug!("Up to date: {}", source.display());
        return Ok(ImageOutcome::UpToDate);
    }

    // Decoded pixels are dropped when this function returns, on every path.
    let image = load_source(backend, source)?;
    let mut written = 0;

    for target in &targets {
        write_target(backend, &image, target, out_config.quality)?;
        let shown = target
            .path
            .strip_prefix(&config.output_dir)
            .unwrap_or(&target.path);
        match target.target_width {
            None => tracing::info!(
                "Original: {} → {}",
                relative.display(),
                shown.display()
            ),
            Some(width) => tracing::info!(
                "Resized: {} → {} ({}px)",
                relative.display(),
                shown.display(),
                width
            ),
        }
        written += 1;
    }

    Ok(ImageOutcome::Written(written))
}

/// Convert every candidate under the source directory.
///
/// Creates the output directory first. A missing source directory is not an
/// error: it is logged as a warning and yields an empty summary. The only
/// error returned is failure to create the output directory; per-image
/// failures are logged and counted.
pub fn process_images(
    backend: &impl ImageBackend,
    config: &WebpConfig,
) -> Result<RunSummary, ProcessError> {
    std::fs::create_dir_all(&config.output_dir)?;

    if !config.source_dir.exists() {
        tracing::warn!(
            "Source directory {} does not exist",
            config.source_dir.display()
        );
        return Ok(RunSummary::default());
    }

    tracing::info!("Processing images from {}", config.source_dir.display());

    let mut summary = RunSummary::default();
    for source in scan::candidates(config) {
        summary.record(process_image_outcome(backend, &source, config));
    }

    tracing::info!("Processed {}", summary);
    Ok(summary)
}
