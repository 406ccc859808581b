//! Parameter types for image operations.
//!
//! These structs describe *what* to write, not *how*. They are the interface
//! between [`operations`](super::operations) and the
//! [`backend`](super::backend).

use std::path::PathBuf;

/// Lossy WebP quality factor.
///
/// Not clamped: an out-of-range value is passed through to the encoder,
/// which rejects it for the image being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub i64);

impl Quality {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Quality as the encoder's float factor.
    pub fn as_factor(self) -> f32 {
        self.0 as f32
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Parameters for writing one WebP file.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub output: PathBuf,
    pub quality: Quality,
}
