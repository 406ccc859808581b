//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the three codec operations the pipeline
//! needs: identify, decode, and WebP encode. Resizing and colour
//! normalisation are pure pixel work and live in
//! [`operations`](super::operations).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::EncodeParams;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// The rest of the crate only talks to this trait, so tests can swap in a
/// mock that records operations instead of touching pixels.
pub trait ImageBackend {
    /// Get image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode an image into memory.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` as lossy WebP and write it to `params.output`.
    fn encode_webp(&self, image: &DynamicImage, params: &EncodeParams)
    -> Result<(), BackendError>;
}
