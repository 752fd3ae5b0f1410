//! # Photo Mill
//!
//! A batch photo optimizer and manifest builder for static portfolio sites.
//! Your filesystem is the data source: a photo tree goes in, web-ready WebP
//! renditions and a JSON manifest come out.
//!
//! # Architecture: Two Independent Pipelines
//!
//! ```text
//! 1. Mirror    photos/  →  optimized_mirror/   (max-width WebP, tree mirrored)
//! 2. Manifest  photos/<category>/  →  optimized/ + photos.json
//!                                     (medium + small WebP, EXIF manifest)
//! ```
//!
//! The pipelines share the imaging layer but depend on nothing in each
//! other; either can run alone. Both are plain batch jobs: single-threaded,
//! run to completion, no state between runs — a rerun regenerates
//! everything from scratch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`mirror`] | Mirror pipeline — walks the tree, one max-width WebP per photo |
//! | [`manifest`] | Manifest pipeline — renditions, EXIF extraction, sorted JSON output |
//! | [`config`] | `photo-mill.toml` loading, validation, stock defaults |
//! | [`exif`] | Capture metadata (date/ISO/aperture/shutter) and orientation |
//! | [`imaging`] | Backend trait, dimension math, WebP encoding, EXIF preservation |
//! | [`naming`] | Rendition file names, photo titles, category labels |
//! | [`output`] | CLI output formatting for progress, skips, and summaries |
//! | [`types`] | `PhotoRecord` (the manifest schema) and `SkippedFile` |
//!
//! # Design Decisions
//!
//! ## WebP-Only Output
//!
//! Every rendition is WebP: universally supported for years, dramatically
//! smaller than JPEG at gallery sizes, and a single format keeps the output
//! tree and the site's markup simple.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and resizing use the `image` crate (Lanczos3), encoding the
//! `webp` crate, metadata the `kamadak-exif` crate — all statically linked.
//! No ImageMagick, no system libraries, no version drift between machines.
//!
//! ## Skip-And-Log, Never Abort
//!
//! A corrupt photo must not sink a thousand-file batch. Per-file failures
//! are values (`SkippedFile` in the run summary) that the pipeline reports
//! and moves past; only environmental failures (unreadable tree, unwritable
//! output, bad config) abort a run. Metadata failures degrade further
//! still: a photo with mangled EXIF keeps its place in the manifest with
//! sentinel values.
//!
//! ## Tagged Dates, Not Sentinel Strings
//!
//! The manifest sorts photos newest-first with undated photos at the end.
//! Rather than relying on how the string `"Unknown"` happens to compare
//! against digits, [`exif::PhotoDate`] makes the unknown case a variant
//! with explicit ordering; serialization still emits the plain string the
//! site expects.
//!
//! ## Two EXIF Policies
//!
//! Mirroring preserves each source's EXIF block (the mirror tree stands in
//! for the originals); manifest renditions strip it (the manifest already
//! carries the interesting fields, and gallery thumbnails have no business
//! shipping GPS tracks). Both are `preserve_exif` flags in config rather
//! than one unified behavior.

pub mod config;
pub mod exif;
pub mod imaging;
pub mod manifest;
pub mod mirror;
pub mod naming;
pub mod output;
pub mod types;
