//! High-level image operations.
//!
//! These functions combine calculations with backend execution: plan which
//! files a source produces, load and normalise the source, and write each
//! planned output.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{ResponsiveSize, calculate_responsive_sizes};
use super::params::{EncodeParams, Quality};
use crate::naming::{original_filename, variant_filename};
use image::DynamicImage;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// One file to write for a source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    /// `None` for the original re-encode, `Some(w)` for a responsive variant.
    pub target_width: Option<i64>,
    pub width: u32,
    pub height: u32,
}

impl OutputTarget {
    pub fn is_original(&self) -> bool {
        self.target_width.is_none()
    }
}

/// Configuration for output planning.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub widths: Vec<i64>,
    pub quality: Quality,
    pub include_original: bool,
}

/// Plan the outputs for one source without touching pixels.
///
/// The original (if enabled) comes first, then one variant per width the
/// source is wide enough for, in configured order.
pub fn plan_outputs(
    output_dir: &Path,
    filename_stem: &str,
    original_dims: (u32, u32),
    config: &OutputConfig,
) -> Vec<OutputTarget> {
    let mut targets = Vec::new();

    if config.include_original {
        targets.push(OutputTarget {
            path: output_dir.join(original_filename(filename_stem)),
            target_width: None,
            width: original_dims.0,
            height: original_dims.1,
        });
    }

    for ResponsiveSize {
        target,
        width,
        height,
    } in calculate_responsive_sizes(original_dims, &config.widths)
    {
        targets.push(OutputTarget {
            path: output_dir.join(variant_filename(filename_stem, target)),
            target_width: Some(target),
            width,
            height,
        });
    }

    targets
}

/// Normalise colour layout for the WebP encoder.
///
/// Anything carrying alpha becomes RGBA8; everything else RGB8. Palette PNGs
/// already arrive as RGBA8 from [`RustBackend`](super::RustBackend), so they
/// stay RGBA.
pub fn normalize_color(img: DynamicImage) -> DynamicImage {
    if img.color().has_alpha() {
        DynamicImage::ImageRgba8(img.into_rgba8())
    } else {
        DynamicImage::ImageRgb8(img.into_rgb8())
    }
}

/// Decode a source image and normalise its colour layout.
pub fn load_source(backend: &impl ImageBackend, path: &Path) -> Result<DynamicImage> {
    let img = backend.decode(path)?;
    Ok(normalize_color(img))
}

/// Write one planned output from an already-decoded source.
///
/// Variants are resized with Lanczos3 to the planned dimensions; the
/// original is encoded as-is.
pub fn write_target(
    backend: &impl ImageBackend,
    source: &DynamicImage,
    target: &OutputTarget,
    quality: Quality,
) -> Result<()> {
    let params = EncodeParams {
        output: target.path.clone(),
        quality,
    };

    if target.is_original() {
        return backend.encode_webp(source, &params);
    }

    if target.width == 0 || target.height == 0 {
        return Err(BackendError::ProcessingFailed(format!(
            "Cannot resize to width {:?} ({}x{})",
            target.target_width, target.width, target.height
        )));
    }
    let resized = source.resize_exact(target.width, target.height, FilterType::Lanczos3);
    backend.encode_webp(&resized, &params)
}
