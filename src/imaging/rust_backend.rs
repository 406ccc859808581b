//! Production image backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | Encode → lossy WebP | `webp::Encoder` (libwebp) |
//!
//! The `image` crate's own WebP encoder is lossless-only, so quality-driven
//! encoding goes through `webp`. It accepts RGB8 and RGBA8 input, which is
//! what [`normalize_color`](super::operations::normalize_color) produces.
//!
//! The PNG decoder expands palette images to plain RGB or RGBA and drops the
//! fact that they were indexed. Decode reads the IHDR colour type itself so
//! every palette PNG comes out as RGBA8.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::EncodeParams;
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
const PNG_COLOR_INDEXED: u8 = 3;

/// True if `path` starts with a PNG header declaring indexed colour.
///
/// Layout: 8-byte signature, IHDR length (4), `IHDR` (4), width (4),
/// height (4), bit depth (1), colour type (1).
fn is_indexed_png(path: &Path) -> io::Result<bool> {
    let mut header = [0u8; 26];
    match File::open(path)?.read_exact(&mut header) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(false),
        Err(e) => return Err(e),
    }
    Ok(&header[..8] == PNG_SIGNATURE
        && &header[12..16] == b"IHDR"
        && header[25] == PNG_COLOR_INDEXED)
}

/// Backend using the `image` crate for decoding and `webp` for encoding.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let img = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
            })?;
        if is_indexed_png(path)? {
            return Ok(DynamicImage::ImageRgba8(img.into_rgba8()));
        }
        Ok(img)
    }

    fn encode_webp(
        &self,
        image: &DynamicImage,
        params: &EncodeParams,
    ) -> Result<(), BackendError> {
        let encoder = webp::Encoder::from_image(image).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Unsupported pixel layout {:?} for WebP: {}",
                image.color(),
                e
            ))
        })?;
        let encoded = encoder
            .encode_simple(false, params.quality.as_factor())
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "WebP encode failed at quality {}: {:?}",
                    params.quality.value(),
                    e
                ))
            })?;
        std::fs::write(&params.output, &*encoded)?;
        Ok(())
    }
}
