//! Settings lookup and the typed pipeline configuration.
//!
//! The host hands over a flat key → value mapping ([`Settings`]) that may hold
//! any number of unrelated keys. [`WebpConfig::from_settings`] picks out the
//! keys this crate recognises, fills in defaults for the rest, and produces an
//! immutable [`WebpConfig`]. Nothing past this module looks at raw keys.
//!
//! ## Settings File
//!
//! The CLI reads settings from a TOML (or `.json`) file. Every key is
//! optional; defaults shown below:
//!
//! ```toml
//! WEBP_SOURCE_DIR = "portfolio/static/images"
//! OUTPUT_PATH = "output"                 # images land in {OUTPUT_PATH}/static/images
//! WEBP_SUPPORTED_FORMATS = [".jpg", ".jpeg", ".png", ".webp"]
//! WEBP_RESPONSIVE_SIZES = [300, 600, 1200]
//! WEBP_QUALITY = 85
//! WEBP_SKIP_DIRS = ["thumbnails"]
//! WEBP_PROCESS_ORIGINAL = true
//! ```
//!
//! Numbers are taken as-is. A quality of 150 or a width of 0 or -1 passes
//! through here and is rejected later, when an image is encoded, for that
//! image only. A value of the wrong *type* (a string quality, a list of
//! strings for widths) fails construction with [`ConfigError::InvalidValue`].

use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SOURCE_DIR_KEY: &str = "WEBP_SOURCE_DIR";
pub const OUTPUT_PATH_KEY: &str = "OUTPUT_PATH";
pub const SUPPORTED_FORMATS_KEY: &str = "WEBP_SUPPORTED_FORMATS";
pub const RESPONSIVE_SIZES_KEY: &str = "WEBP_RESPONSIVE_SIZES";
pub const QUALITY_KEY: &str = "WEBP_QUALITY";
pub const SKIP_DIRS_KEY: &str = "WEBP_SKIP_DIRS";
pub const PROCESS_ORIGINAL_KEY: &str = "WEBP_PROCESS_ORIGINAL";

const DEFAULT_SOURCE_DIR: &str = "portfolio/static/images";
const DEFAULT_OUTPUT_PATH: &str = "output";
const DEFAULT_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];
const DEFAULT_WIDTHS: &[i64] = &[300, 600, 1200];
const DEFAULT_QUALITY: i64 = 85;
const DEFAULT_SKIP_DIRS: &[&str] = &["thumbnails"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Host-provided settings: an arbitrary key → value lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: toml::Table,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let values: toml::Table = toml::from_str(content)?;
        Ok(Self { values })
    }

    /// Parse settings from a JSON object.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let values: toml::Table = serde_json::from_str(content)?;
        Ok(Self { values })
    }

    /// Load settings from a file.
    ///
    /// `.json` files are parsed as JSON, anything else as TOML. A missing
    /// file is not an error: it yields empty settings, i.e. all defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Set or replace a single key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<toml::Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Typed lookup. `Ok(None)` when the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let Some(value) = self.values.get(key) else {
            return Ok(None);
        };
        value
            .clone()
            .try_into()
            .map(Some)
            .map_err(|e: toml::de::Error| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.message().to_string(),
            })
    }

    fn get_or<T: DeserializeOwned>(
        &self,
        key: &str,
        default: impl FnOnce() -> T,
    ) -> Result<T, ConfigError> {
        Ok(self.get(key)?.unwrap_or_else(default))
    }
}

/// Fully-resolved pipeline configuration. Built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct WebpConfig {
    /// Root of the source image tree.
    pub source_dir: PathBuf,
    /// Root of the generated WebP tree (`{OUTPUT_PATH}/static/images`).
    pub output_dir: PathBuf,
    /// Extensions eligible for conversion, with leading dot (`.jpg`).
    pub supported_extensions: BTreeSet<String>,
    /// Target widths for downscaled variants, in configured order.
    pub responsive_widths: Vec<i64>,
    /// Lossy WebP quality factor (0 = worst, 100 = best).
    pub quality: i64,
    /// Directory names whose contents are never converted.
    pub skip_dir_names: BTreeSet<String>,
    /// Whether to emit a full-resolution re-encode alongside the variants.
    pub process_original: bool,
}

impl Default for WebpConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: output_dir_for(Path::new(DEFAULT_OUTPUT_PATH)),
            supported_extensions: default_extensions(),
            responsive_widths: DEFAULT_WIDTHS.to_vec(),
            quality: DEFAULT_QUALITY,
            skip_dir_names: default_skip_dirs(),
            process_original: true,
        }
    }
}

impl WebpConfig {
    /// Build a config from host settings, falling back to defaults per key.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let source_dir: String =
            settings.get_or(SOURCE_DIR_KEY, || DEFAULT_SOURCE_DIR.to_string())?;
        let output_path: String =
            settings.get_or(OUTPUT_PATH_KEY, || DEFAULT_OUTPUT_PATH.to_string())?;
        let supported_extensions: Vec<String> = settings.get_or(SUPPORTED_FORMATS_KEY, || {
            default_extensions().into_iter().collect()
        })?;
        let skip_dir_names: Vec<String> = settings.get_or(SKIP_DIRS_KEY, || {
            default_skip_dirs().into_iter().collect()
        })?;

        Ok(Self {
            source_dir: PathBuf::from(source_dir),
            output_dir: output_dir_for(Path::new(&output_path)),
            supported_extensions: supported_extensions.into_iter().collect(),
            responsive_widths: settings.get_or(RESPONSIVE_SIZES_KEY, || DEFAULT_WIDTHS.to_vec())?,
            quality: settings.get_or(QUALITY_KEY, || DEFAULT_QUALITY)?,
            skip_dir_names: skip_dir_names.into_iter().collect(),
            process_original: settings.get_or(PROCESS_ORIGINAL_KEY, || true)?,
        })
    }
}

/// Images are written under `static/images` of the site output path.
pub fn output_dir_for(output_path: &Path) -> PathBuf {
    output_path.join("static").join("images")
}

fn default_extensions() -> BTreeSet<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_skip_dirs() -> BTreeSet<String> {
    DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect()
}

/// Returns a fully-commented stock settings file with every key and its default.
///
/// Used by the `gen-config` CLI command.
pub fn stock_settings_toml() -> &'static str {
    r##"# webp-images settings
# ====================
# All settings are optional. Values shown below are the defaults.
# Keys not listed here are ignored, so this can live in a larger site config.

# Directory holding the source images. Walked recursively.
WEBP_SOURCE_DIR = "portfolio/static/images"

# Site output directory. WebP files are written to {OUTPUT_PATH}/static/images,
# mirroring the directory layout under WEBP_SOURCE_DIR.
OUTPUT_PATH = "output"

# File extensions to convert (matched case-insensitively, leading dot included).
WEBP_SUPPORTED_FORMATS = [".jpg", ".jpeg", ".png", ".webp"]

# Widths for downscaled variants, written as {name}-{width}.webp.
# Images narrower than a width are never upscaled to it.
WEBP_RESPONSIVE_SIZES = [300, 600, 1200]

# Lossy WebP quality (0 = worst, 100 = best).
WEBP_QUALITY = 85

# Directory names whose contents are never converted.
WEBP_SKIP_DIRS = ["thumbnails"]

# Also write a full-resolution {name}.webp next to the variants.
WEBP_PROCESS_ORIGINAL = true
"##
}
