//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations both pipelines
//! need: identify, read_capture, and resize. The production implementation
//! is [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, zero
//! external dependencies, statically linked into the binary.

use super::params::ResizeParams;
use crate::exif::CaptureMeta;
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
/// Every backend must implement all three operations so the pipelines stay
/// backend-agnostic and testable against the recording mock.
pub trait ImageBackend {
    /// Get image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Read embedded EXIF capture metadata (date, ISO, aperture, shutter).
    ///
    /// Infallible by contract: unreadable metadata degrades to sentinels.
    fn read_capture(&self, path: &Path) -> CaptureMeta;

    /// Execute a resize-and-encode operation.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
