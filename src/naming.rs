//! Output filename conventions.
//!
//! Every candidate `name.ext` produces at most:
//! - `name.webp`: the original, re-encoded at source resolution
//! - `name-{width}.webp`: one per responsive width the source can cover
//!
//! The `-{width}` suffix doubles as the marker for already-generated
//! variants: a source whose stem ends in `-{w}` for a configured width is
//! treated as a variant and never converted again (see [`crate::filter`]).
//!
//! Only the widths configured for the current run are recognised. After a
//! width is removed from the config, its old variants look like ordinary
//! sources and get converted.

/// Filename of the full-resolution WebP for a stem.
pub fn original_filename(stem: &str) -> String {
    format!("{}.webp", stem)
}

/// Filename of a responsive variant for a stem and target width.
pub fn variant_filename(stem: &str, width: i64) -> String {
    format!("{}-{}.webp", stem, width)
}

/// Returns the first configured width whose `-{w}` suffix ends `stem`.
///
/// - `"photo-300"`, `[300, 600]` → `Some(300)`
/// - `"photo-3000"`, `[300]` → `None` (suffix is `-3000`, not `-300`)
/// - `"photo"`, `[300]` → `None`
pub fn variant_suffix(stem: &str, widths: &[i64]) -> Option<i64> {
    widths
        .iter()
        .copied()
        .find(|w| stem.ends_with(&format!("-{}", w)))
}
