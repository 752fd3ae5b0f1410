//! The Manifest-Builder pipeline.
//!
//! Walks a fixed set of category directories, produces medium and small
//! WebP renditions per photo, extracts capture metadata, and writes the
//! JSON manifest the site consumes:
//!
//! ```text
//! public/photos/animals/foxes/red_fox.jpg
//!   → public/optimized/animals/foxes/medium/red_fox.webp
//!   → public/optimized/animals/foxes/small/red_fox.webp
//!   → one PhotoRecord in src/photos.json
//! ```
//!
//! Records are sorted by capture date, newest first, with unknown dates
//! sinking to the end; `id` is the 1-based position in that final order.
//! The manifest is fully regenerated every run — nothing is merged from a
//! previous file.

use crate::config::ManifestConfig;
use crate::imaging::{
    BackendError, ImageBackend, Quality, RenditionConfig, create_renditions, get_dimensions,
};
use crate::naming;
use crate::output;
use crate::types::{PhotoRecord, SkippedFile};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a manifest run did, for reporting and tests.
#[derive(Debug)]
pub struct ManifestSummary {
    pub photo_count: usize,
    pub skipped: Vec<SkippedFile>,
    pub manifest_path: PathBuf,
}

/// Run the manifest pipeline: collect records, then write the JSON file.
pub fn run(
    backend: &impl ImageBackend,
    config: &ManifestConfig,
) -> Result<ManifestSummary, ManifestError> {
    let (records, skipped) = collect_records(backend, config)?;
    write_manifest(&records, &config.manifest_path)?;
    Ok(ManifestSummary {
        photo_count: records.len(),
        skipped,
        manifest_path: config.manifest_path.clone(),
    })
}

/// Walk all configured categories and build the sorted, numbered record
/// list. The accumulator is local and returned; no state survives the call.
pub fn collect_records(
    backend: &impl ImageBackend,
    config: &ManifestConfig,
) -> Result<(Vec<PhotoRecord>, Vec<SkippedFile>), ManifestError> {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    let renditions = RenditionConfig {
        medium_box: config.medium_box,
        small_box: config.small_box,
        quality_medium: Quality::new(config.quality_medium),
        quality_small: Quality::new(config.quality_small),
        auto_orient: true,
        keep_metadata: config.preserve_exif,
    };

    for category in &config.categories {
        let category_root = config.input_root.join(category);
        if !category_root.is_dir() {
            continue;
        }

        for entry in WalkDir::new(&category_root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !config.allows(entry.path()) {
                continue;
            }

            let source = entry.path();
            let rel = source.strip_prefix(&category_root).unwrap_or(source);
            output::print_processing(category, rel);

            match process_photo(backend, config, &renditions, category, &category_root, source) {
                Ok(record) => records.push(record),
                Err(err) => {
                    output::print_skipped(source, &err.to_string());
                    skipped.push(SkippedFile {
                        source: source.to_path_buf(),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    sort_and_number(&mut records);
    Ok((records, skipped))
}

/// Process one photo: renditions, metadata, record assembly.
fn process_photo(
    backend: &impl ImageBackend,
    config: &ManifestConfig,
    renditions: &RenditionConfig,
    category: &str,
    category_root: &Path,
    source: &Path,
) -> Result<PhotoRecord, BackendError> {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let rel_dir = source
        .parent()
        .and_then(|p| p.strip_prefix(category_root).ok())
        .unwrap_or(Path::new(""));

    let variant_root = config.output_root.join(category).join(rel_dir);
    let medium_dir = variant_root.join("medium");
    let small_dir = variant_root.join("small");
    std::fs::create_dir_all(&medium_dir)?;
    std::fs::create_dir_all(&small_dir)?;

    let dims = get_dimensions(backend, source)?;
    let set = create_renditions(
        backend, source, &medium_dir, &small_dir, &file_name, dims, renditions,
    )?;
    let capture = backend.read_capture(source);

    let url_rel = url_prefix(rel_dir);
    let stem = Path::new(&file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(PhotoRecord {
        url_large: format!(
            "{}/{}/{}{}",
            config.public_photo_root, category, url_rel, file_name
        ),
        url_medium: format!(
            "{}/{}/{}medium/{}",
            config.public_optimized_root, category, url_rel, set.file_name
        ),
        url_small: format!(
            "{}/{}/{}small/{}",
            config.public_optimized_root, category, url_rel, set.file_name
        ),
        category: naming::display_category(category),
        title: naming::display_title(&stem),
        date: capture.date,
        iso: capture.iso,
        aperture: capture.aperture,
        shutter: capture.shutter,
        width: dims.0,
        height: dims.1,
        id: 0, // assigned after the full list is sorted
    })
}

/// Sort newest-first (unknown dates last) and assign dense 1-based ids.
///
/// The sort is stable, so photos sharing a date keep their walk order.
fn sort_and_number(records: &mut [PhotoRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
    for (index, record) in records.iter_mut().enumerate() {
        record.id = index as u32 + 1;
    }
}

/// URL form of a relative directory: empty for the category root, otherwise
/// forward-slash separated with a trailing slash (`"foxes/dens/"`).
fn url_prefix(rel_dir: &Path) -> String {
    let joined = rel_dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        joined
    } else {
        format!("{joined}/")
    }
}

/// Serialize records as a pretty-printed JSON array (4-space indentation)
/// to `path`, overwriting any previous manifest.
pub fn write_manifest(records: &[PhotoRecord], path: &Path) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}
