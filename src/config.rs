//! Run configuration for both pipelines.
//!
//! Loaded from a single `photo-mill.toml` with one table per pipeline.
//! Every field has a stock default, so a missing file means "run with the
//! defaults" and a user file only needs the values it wants to override.
//! Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [mirror]
//! input_root = "public/photos"
//! output_root = "public/optimized_mirror"
//! max_width = 1920              # Scale-down threshold; narrower files pass through
//! quality = 75                  # WebP quality (1-100)
//! preserve_exif = true          # Carry the source EXIF block into outputs
//! allowed_extensions = ["jpg", "jpeg", "png", "webp"]
//!
//! [manifest]
//! input_root = "public/photos"
//! output_root = "public/optimized"
//! manifest_path = "src/photos.json"
//! categories = ["animals", "misc", "people", "panos"]
//! medium_box = 1200             # Medium rendition bounding box (pixels)
//! small_box = 600               # Small rendition bounding box (pixels)
//! quality_medium = 80
//! quality_small = 60
//! preserve_exif = false         # Renditions are stripped by default
//! allowed_extensions = ["jpg", "jpeg", "png", "webp"]
//! public_photo_root = "/portfolio/photos"
//! public_optimized_root = "/portfolio/optimized"
//! ```
//!
//! The two `preserve_exif` flags are deliberately independent: mirroring
//! keeps the originals' metadata, manifest renditions strip it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration: one table per pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MillConfig {
    pub mirror: MirrorConfig,
    pub manifest: ManifestConfig,
}

impl MillConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, quality) in [
            ("mirror.quality", self.mirror.quality),
            ("manifest.quality_medium", self.manifest.quality_medium),
            ("manifest.quality_small", self.manifest.quality_small),
        ] {
            if !(1..=100).contains(&quality) {
                return Err(ConfigError::Validation(format!("{name} must be 1-100")));
            }
        }
        if self.mirror.max_width == 0 {
            return Err(ConfigError::Validation(
                "mirror.max_width must be non-zero".into(),
            ));
        }
        if self.manifest.medium_box == 0 || self.manifest.small_box == 0 {
            return Err(ConfigError::Validation(
                "manifest rendition boxes must be non-zero".into(),
            ));
        }
        if self.manifest.categories.is_empty() {
            return Err(ConfigError::Validation(
                "manifest.categories must not be empty".into(),
            ));
        }
        if self.mirror.allowed_extensions.is_empty() || self.manifest.allowed_extensions.is_empty()
        {
            return Err(ConfigError::Validation(
                "allowed_extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Mirror-Optimizer settings: one max-width WebP per source file, written
/// into a tree mirroring the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    /// Photo tree to walk.
    pub input_root: PathBuf,
    /// Root of the mirrored output tree.
    pub output_root: PathBuf,
    /// Scale-down threshold; sources at or under it keep their size.
    pub max_width: u32,
    /// WebP quality (1-100).
    pub quality: u32,
    /// Carry each source's EXIF block into its output.
    pub preserve_exif: bool,
    /// Extensions to process, matched case-insensitively.
    pub allowed_extensions: Vec<String>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("public/photos"),
            output_root: PathBuf::from("public/optimized_mirror"),
            max_width: 1920,
            quality: 75,
            preserve_exif: true,
            allowed_extensions: default_extensions(),
        }
    }
}

impl MirrorConfig {
    pub fn allows(&self, path: &Path) -> bool {
        extension_allowed(path, &self.allowed_extensions)
    }
}

/// Manifest-Builder settings: two renditions per photo plus the JSON
/// manifest consumed by the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Root holding the category directories.
    pub input_root: PathBuf,
    /// Root of the rendition output tree.
    pub output_root: PathBuf,
    /// Where the JSON manifest is written (overwritten every run).
    pub manifest_path: PathBuf,
    /// Category directories under `input_root`; absent ones are skipped.
    pub categories: Vec<String>,
    /// Bounding box edge for medium renditions (pixels).
    pub medium_box: u32,
    /// Bounding box edge for small renditions (pixels).
    pub small_box: u32,
    pub quality_medium: u32,
    pub quality_small: u32,
    /// Carry each source's EXIF block into its renditions.
    pub preserve_exif: bool,
    /// Extensions to process, matched case-insensitively.
    pub allowed_extensions: Vec<String>,
    /// Public URL prefix for the untouched originals (`url_large`).
    pub public_photo_root: String,
    /// Public URL prefix for the rendition tree (`url_medium`/`url_small`).
    pub public_optimized_root: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("public/photos"),
            output_root: PathBuf::from("public/optimized"),
            manifest_path: PathBuf::from("src/photos.json"),
            categories: ["animals", "misc", "people", "panos"]
                .map(String::from)
                .to_vec(),
            medium_box: 1200,
            small_box: 600,
            quality_medium: 80,
            quality_small: 60,
            preserve_exif: false,
            allowed_extensions: default_extensions(),
            public_photo_root: "/portfolio/photos".to_string(),
            public_optimized_root: "/portfolio/optimized".to_string(),
        }
    }
}

impl ManifestConfig {
    pub fn allows(&self, path: &Path) -> bool {
        extension_allowed(path, &self.allowed_extensions)
    }
}

fn default_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "webp"].map(String::from).to_vec()
}

/// Case-insensitive extension allow-list check.
pub fn extension_allowed(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.to_lowercase() == ext))
}

/// Load config from a TOML file.
///
/// A missing file yields the stock defaults; a present file is parsed
/// strictly (unknown keys rejected) and validated.
pub fn load_config(path: &Path) -> Result<MillConfig, ConfigError> {
    if !path.exists() {
        return Ok(MillConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: MillConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// The stock config as a documented TOML string, for `gen-config`.
pub fn stock_config_toml() -> String {
    let header = "\
# photo-mill configuration. Every option is optional; the values below are
# the stock defaults. Unknown keys are rejected.

";
    let body = toml::to_string_pretty(&MillConfig::default())
        .expect("default config must serialize");
    format!("{header}{body}")
}
