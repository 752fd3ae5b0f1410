//! CLI output formatting for both pipelines.
//!
//! Each message has a `format_*` function (pure, returns strings) and a
//! `print_*` wrapper that writes to stdout/stderr, so tests can assert on
//! the text without capturing streams. Successful progress goes to stdout;
//! per-file skip reports go to stderr.
//!
//! ```text
//! Optimized: trips/japan/tokyo.jpg -> tokyo.webp
//! [ANIMALS] Processing: foxes/red_fox.jpg
//! Error processing broken.jpg: Failed to decode ...
//! Mirrored 41 photos (2 skipped) -> public/optimized_mirror
//! Manifest: 128 photos -> src/photos.json (1 skipped)
//! ```

use crate::manifest::ManifestSummary;
use crate::mirror::MirrorSummary;
use crate::types::SkippedFile;
use std::path::Path;

/// Per-file mirror progress line.
pub fn format_optimized(source_rel: &Path, output_name: &str) -> String {
    format!("Optimized: {} -> {}", source_rel.display(), output_name)
}

pub fn print_optimized(source_rel: &Path, output_name: &str) {
    println!("{}", format_optimized(source_rel, output_name));
}

/// Per-file manifest progress line; the category is upper-cased as a batch
/// marker so interleaved categories stay readable.
pub fn format_processing(category: &str, rel: &Path) -> String {
    format!("[{}] Processing: {}", category.to_uppercase(), rel.display())
}

pub fn print_processing(category: &str, rel: &Path) {
    println!("{}", format_processing(category, rel));
}

/// Per-file skip report: file name plus the underlying error.
pub fn format_skipped(source: &Path, reason: &str) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| source.display().to_string());
    format!("Error processing {name}: {reason}")
}

pub fn print_skipped(source: &Path, reason: &str) {
    eprintln!("{}", format_skipped(source, reason));
}

/// End-of-run mirror summary.
pub fn format_mirror_summary(summary: &MirrorSummary, output_root: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Mirrored {} photos{} -> {}",
        summary.optimized.len(),
        skip_note(&summary.skipped),
        output_root.display()
    )];
    lines.extend(skip_lines(&summary.skipped));
    lines
}

pub fn print_mirror_summary(summary: &MirrorSummary, output_root: &Path) {
    for line in format_mirror_summary(summary, output_root) {
        println!("{line}");
    }
}

/// End-of-run manifest summary.
pub fn format_manifest_summary(summary: &ManifestSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Manifest: {} photos -> {}{}",
        summary.photo_count,
        summary.manifest_path.display(),
        skip_note(&summary.skipped)
    )];
    lines.extend(skip_lines(&summary.skipped));
    lines
}

pub fn print_manifest_summary(summary: &ManifestSummary) {
    for line in format_manifest_summary(summary) {
        println!("{line}");
    }
}

fn skip_note(skipped: &[SkippedFile]) -> String {
    if skipped.is_empty() {
        String::new()
    } else {
        format!(" ({} skipped)", skipped.len())
    }
}

fn skip_lines(skipped: &[SkippedFile]) -> Vec<String> {
    skipped
        .iter()
        .map(|skip| format!("  skipped {}: {}", skip.source.display(), skip.reason))
        .collect()
}
