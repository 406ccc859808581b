//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Height of a downscale to `target_width`, preserving aspect ratio.
///
/// `round(height * target_width / width)`. A zero-width source maps to zero.
pub fn scaled_height(original: (u32, u32), target_width: u32) -> u32 {
    let (orig_w, orig_h) = original;
    if orig_w == 0 {
        return 0;
    }
    (orig_h as f64 * target_width as f64 / orig_w as f64).round() as u32
}

/// Represents a single responsive size to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveSize {
    /// Configured target width.
    pub target: i64,
    /// Calculated output width.
    pub width: u32,
    /// Calculated output height.
    pub height: u32,
}

/// Calculate which responsive widths to generate and their dimensions.
///
/// Widths larger than the original are dropped (no upscaling), so a source
/// narrower than every width yields an empty list. Order follows `widths`.
/// A non-positive width is kept with a 0x0 size; writing it fails.
///
/// # Arguments
/// * `original` - Original image dimensions (width, height)
/// * `widths` - Configured target widths
pub fn calculate_responsive_sizes(original: (u32, u32), widths: &[i64]) -> Vec<ResponsiveSize> {
    let (orig_w, _) = original;

    widths
        .iter()
        .filter(|&&target| target <= i64::from(orig_w))
        .map(|&target| {
            let width = u32::try_from(target).unwrap_or(0);
            ResponsiveSize {
                target,
                width,
                height: if width == 0 {
                    0
                } else {
                    scaled_height(original, width)
                },
            }
        })
        .collect()
}
