//! Shared types produced by the pipelines.
//!
//! [`PhotoRecord`] is the manifest's JSON schema: field order here is the
//! serialized order the site consumes, so new fields go at the end and `id`
//! stays last (it is assigned after sorting).

use crate::exif::PhotoDate;
use serde::Serialize;
use std::path::PathBuf;

/// One manifest entry per successfully processed photo.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoRecord {
    /// Public URL of the untouched original.
    pub url_large: String,
    /// Public URL of the medium rendition.
    pub url_medium: String,
    /// Public URL of the small rendition.
    pub url_small: String,
    /// Display-cased category name.
    pub category: String,
    /// Display title derived from the file stem.
    pub title: String,
    /// Capture date (`YYYY-MM-DD`) or `"Unknown"`; also the sort key.
    pub date: PhotoDate,
    pub iso: String,
    pub aperture: String,
    pub shutter: String,
    /// Original pixel dimensions, pre-resize.
    pub width: u32,
    pub height: u32,
    /// 1-based position in the date-sorted manifest. Dense 1..N, recomputed
    /// from scratch on every run.
    pub id: u32,
}

/// A file the batch could not process: recorded, reported, and moved past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub source: PathBuf,
    pub reason: String,
}
