//! Candidate filtering.
//!
//! A file is converted only if it is [supported](is_supported) and not
//! [skipped](should_skip). Both predicates are pure and look only at the path.

use crate::config::WebpConfig;
use crate::naming::variant_suffix;
use std::path::Path;

/// True if the path's extension, lowercased, is a supported format.
///
/// Extensions are compared with their leading dot, as configured
/// (`photo.JPG` → `.jpg`). Paths without an extension are never supported.
pub fn is_supported(path: &Path, config: &WebpConfig) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .is_some_and(|e| config.supported_extensions.contains(&e))
}

/// True if the path lies under a skip directory or looks like a generated
/// variant (`name-{w}` for a configured width).
///
/// The two checks are independent; either one skips the file.
pub fn should_skip(path: &Path, config: &WebpConfig) -> bool {
    let in_skip_dir = path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| config.skip_dir_names.contains(name))
    });
    if in_skip_dir {
        return true;
    }

    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| variant_suffix(stem, &config.responsive_widths).is_some())
}

/// A path is a candidate iff it is supported and not skipped.
pub fn is_candidate(path: &Path, config: &WebpConfig) -> bool {
    is_supported(path, config) && !should_skip(path, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn config() -> WebpConfig {
        WebpConfig::default()
    }

    // =========================================================================
    // is_supported
    // =========================================================================

    #[test]
    fn supports_default_formats() {
        let c = config();
        for name in ["a.jpg", "a.jpeg", "a.png", "a.webp"] {
            assert!(is_supported(Path::new(name), &c), "{name}");
        }
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let c = config();
        assert!(is_supported(Path::new("/pics/IMG_001.JPG"), &c));
        assert!(is_supported(Path::new("/pics/scan.Png"), &c));
    }

    #[test]
    fn rejects_unsupported_and_missing_extensions() {
        let c = config();
        assert!(!is_supported(Path::new("notes.txt"), &c));
        assert!(!is_supported(Path::new("photo.tiff"), &c));
        assert!(!is_supported(Path::new("README"), &c));
    }

    #[test]
    fn respects_custom_formats() {
        let c = WebpConfig {
            supported_extensions: BTreeSet::from([".png".to_string()]),
            ..config()
        };
        assert!(is_supported(Path::new("a.png"), &c));
        assert!(!is_supported(Path::new("a.jpg"), &c));
    }

    // =========================================================================
    // should_skip
    // =========================================================================

    #[test]
    fn skips_anything_under_skip_dir() {
        let c = config();
        assert!(should_skip(Path::new("/test/thumbnails/image.jpg"), &c));
        assert!(should_skip(Path::new("/test/thumbnails/deep/nested.png"), &c));
    }

    #[test]
    fn skip_dir_must_match_whole_component() {
        let c = config();
        assert!(!should_skip(Path::new("/test/my-thumbnails/image.jpg"), &c));
    }

    #[test]
    fn skips_generated_variants() {
        let c = config();
        assert!(should_skip(Path::new("/test/image-300.jpg"), &c));
        assert!(should_skip(Path::new("/test/photo-1200.webp"), &c));
    }

    #[test]
    fn keeps_normal_images() {
        let c = config();
        assert!(!should_skip(Path::new("/test/image.jpg"), &c));
        assert!(!should_skip(Path::new("/test/2024-trip/image-2.jpg"), &c));
    }

    #[test]
    fn both_conditions_skip() {
        let c = config();
        assert!(should_skip(Path::new("/test/thumbnails/image-600.jpg"), &c));
    }

    #[test]
    fn suffix_check_follows_current_widths() {
        let c = WebpConfig {
            responsive_widths: vec![400, 800],
            ..config()
        };
        // A leftover 300px variant from an older config is no longer recognised
        assert!(!should_skip(Path::new("/test/image-300.jpg"), &c));
        assert!(should_skip(Path::new("/test/image-400.jpg"), &c));
    }

    // =========================================================================
    // is_candidate
    // =========================================================================

    #[test]
    fn candidate_requires_support_and_no_skip() {
        let c = config();
        assert!(is_candidate(Path::new("/src/a.jpg"), &c));
        assert!(!is_candidate(Path::new("/src/a.gif"), &c));
        assert!(!is_candidate(Path::new("/src/a-300.jpg"), &c));
        assert!(!is_candidate(Path::new("/src/thumbnails/c.jpg"), &c));
    }
}
