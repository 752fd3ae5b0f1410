//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they take
//! configuration, compute target dimensions and output names, and call the
//! backend. One function per pipeline mode — max-width mirroring and the
//! medium/small rendition pair.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{fit_within_box, scale_to_max_width};
use super::params::{Quality, ResizeParams};
use crate::naming;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Configuration for the single max-width mirror rendition.
#[derive(Debug, Clone)]
pub struct MirrorOpts {
    pub max_width: u32,
    pub quality: Quality,
    /// Carry the source EXIF block into the output.
    pub keep_metadata: bool,
}

/// A mirrored output: rendition file name and final dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredOutput {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// Produce one max-width-bounded WebP copy of `source` in `output_dir`.
///
/// The mirror pipeline does not auto-orient; pixels pass through as stored.
pub fn mirror_image(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    file_name: &str,
    original_dims: (u32, u32),
    opts: &MirrorOpts,
) -> Result<MirroredOutput> {
    let out_name = naming::rendition_file_name(file_name);
    let (width, height) = scale_to_max_width(original_dims, opts.max_width);

    backend.resize(&ResizeParams {
        source: source.to_path_buf(),
        output: output_dir.join(&out_name),
        width,
        height,
        quality: opts.quality,
        auto_orient: false,
        keep_metadata: opts.keep_metadata,
    })?;

    Ok(MirroredOutput {
        file_name: out_name,
        width,
        height,
    })
}

/// Configuration for the medium/small rendition pair.
#[derive(Debug, Clone)]
pub struct RenditionConfig {
    pub medium_box: u32,
    pub small_box: u32,
    pub quality_medium: Quality,
    pub quality_small: Quality,
    /// Apply EXIF orientation before resizing.
    pub auto_orient: bool,
    /// Carry the source EXIF block into the outputs.
    pub keep_metadata: bool,
}

/// Both renditions of one photo: shared file name plus per-variant dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenditionSet {
    pub file_name: String,
    pub medium: (u32, u32),
    pub small: (u32, u32),
}

/// Produce the medium and small box-bounded WebP renditions of `source`.
pub fn create_renditions(
    backend: &impl ImageBackend,
    source: &Path,
    medium_dir: &Path,
    small_dir: &Path,
    file_name: &str,
    original_dims: (u32, u32),
    config: &RenditionConfig,
) -> Result<RenditionSet> {
    let out_name = naming::rendition_file_name(file_name);

    let medium = fit_within_box(original_dims, config.medium_box);
    backend.resize(&ResizeParams {
        source: source.to_path_buf(),
        output: medium_dir.join(&out_name),
        width: medium.0,
        height: medium.1,
        quality: config.quality_medium,
        auto_orient: config.auto_orient,
        keep_metadata: config.keep_metadata,
    })?;

    let small = fit_within_box(original_dims, config.small_box);
    backend.resize(&ResizeParams {
        source: source.to_path_buf(),
        output: small_dir.join(&out_name),
        width: small.0,
        height: small.1,
        quality: config.quality_small,
        auto_orient: config.auto_orient,
        keep_metadata: config.keep_metadata,
    })?;

    Ok(RenditionSet {
        file_name: out_name,
        medium,
        small,
    })
}
