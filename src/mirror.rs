//! The Mirror-Optimizer pipeline.
//!
//! Walks the input photo tree and writes one max-width-bounded WebP per
//! source image into an output tree mirroring the input's directory
//! structure:
//!
//! ```text
//! public/photos/trips/japan/tokyo.jpg
//!   → public/optimized_mirror/trips/japan/tokyo.webp
//! ```
//!
//! Per-file failures (corrupt files, undecodable formats) are recorded in
//! the summary and reported, and the walk continues; only environmental
//! failures (unreadable tree, unwritable output root) abort the run.

use crate::config::MirrorConfig;
use crate::imaging::{
    BackendError, ImageBackend, MirrorOpts, MirroredOutput, Quality, get_dimensions, mirror_image,
};
use crate::output;
use crate::types::SkippedFile;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One successfully mirrored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredFile {
    /// Source path relative to the input root.
    pub source: PathBuf,
    /// Output path relative to the output root.
    pub output: PathBuf,
    /// Final output dimensions.
    pub width: u32,
    pub height: u32,
}

/// Everything a mirror run did, for reporting and tests.
#[derive(Debug, Default)]
pub struct MirrorSummary {
    pub optimized: Vec<MirroredFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Run the mirror pipeline over the configured input tree.
pub fn run(
    backend: &impl ImageBackend,
    config: &MirrorConfig,
) -> Result<MirrorSummary, MirrorError> {
    let mut summary = MirrorSummary::default();
    let opts = MirrorOpts {
        max_width: config.max_width,
        quality: Quality::new(config.quality),
        keep_metadata: config.preserve_exif,
    };

    for entry in WalkDir::new(&config.input_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !config.allows(entry.path()) {
            continue;
        }

        let source = entry.path();
        let rel = source
            .strip_prefix(&config.input_root)
            .unwrap_or(source)
            .to_path_buf();
        let output_dir = match rel.parent() {
            Some(parent) => config.output_root.join(parent),
            None => config.output_root.clone(),
        };
        std::fs::create_dir_all(&output_dir)?;

        let file_name = rel
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match process_file(backend, source, &output_dir, &file_name, &opts) {
            Ok(out) => {
                output::print_optimized(&rel, &out.file_name);
                let output_rel = match rel.parent() {
                    Some(parent) => parent.join(&out.file_name),
                    None => PathBuf::from(&out.file_name),
                };
                summary.optimized.push(MirroredFile {
                    source: rel,
                    output: output_rel,
                    width: out.width,
                    height: out.height,
                });
            }
            Err(err) => {
                output::print_skipped(source, &err.to_string());
                summary.skipped.push(SkippedFile {
                    source: source.to_path_buf(),
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(summary)
}

fn process_file(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    file_name: &str,
    opts: &MirrorOpts,
) -> Result<MirroredOutput, BackendError> {
    let dims = get_dimensions(backend, source)?;
    mirror_image(backend, source, output_dir, file_name, dims, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    fn config_for(tmp: &TempDir) -> MirrorConfig {
        MirrorConfig {
            input_root: tmp.path().join("photos"),
            output_root: tmp.path().join("mirror"),
            ..MirrorConfig::default()
        }
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "fake image").unwrap();
    }

    #[test]
    fn mirrors_tree_structure() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(&tmp);
        touch(&config.input_root.join("a.jpg"));
        touch(&config.input_root.join("trips/japan/tokyo.jpg"));

        // Visit order is sorted: a.jpg then trips/japan/tokyo.jpg.
        // Mock results pop from the back.
        let backend = MockBackend::with_dimensions(vec![dims(4000, 2000), dims(800, 600)]);

        let summary = run(&backend, &config).unwrap();

        assert!(summary.skipped.is_empty());
        assert_eq!(summary.optimized.len(), 2);
        assert_eq!(summary.optimized[0].source, PathBuf::from("a.jpg"));
        assert_eq!(summary.optimized[0].output, PathBuf::from("a.webp"));
        assert_eq!((summary.optimized[0].width, summary.optimized[0].height), (800, 600));
        assert_eq!(
            summary.optimized[1].output,
            PathBuf::from("trips/japan/tokyo.webp")
        );
        assert_eq!((summary.optimized[1].width, summary.optimized[1].height), (1920, 960));

        // Output directories were created even though the mock writes nothing.
        assert!(config.output_root.join("trips/japan").is_dir());
    }

    #[test]
    fn ignores_files_outside_allow_list() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(&tmp);
        touch(&config.input_root.join("notes.txt"));
        touch(&config.input_root.join("raw.cr2"));
        touch(&config.input_root.join("photo.jpg"));

        let backend = MockBackend::with_dimensions(vec![dims(100, 100)]);
        let summary = run(&backend, &config).unwrap();

        assert_eq!(summary.optimized.len(), 1);
        assert_eq!(summary.optimized[0].source, PathBuf::from("photo.jpg"));
        // Only the jpg was identified
        let identifies = backend
            .get_operations()
            .iter()
            .filter(|op| matches!(op, RecordedOp::Identify(_)))
            .count();
        assert_eq!(identifies, 1);
    }

    #[test]
    fn corrupt_file_is_skipped_and_batch_continues() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(&tmp);
        touch(&config.input_root.join("broken.jpg"));
        touch(&config.input_root.join("good.jpg"));

        // Visit order: broken.jpg, good.jpg — broken pops the error.
        let backend = MockBackend {
            identify_results: RefCell::new(vec![
                Ok(dims(640, 480)),
                Err("corrupt header".to_string()),
            ]),
            ..MockBackend::default()
        };

        let summary = run(&backend, &config).unwrap();

        assert_eq!(summary.optimized.len(), 1);
        assert_eq!(summary.optimized[0].source, PathBuf::from("good.jpg"));
        assert_eq!(summary.skipped.len(), 1);
        assert!(summary.skipped[0].source.ends_with("broken.jpg"));
        assert!(summary.skipped[0].reason.contains("corrupt header"));
    }

    #[test]
    fn resize_params_follow_config() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_for(&tmp);
        config.max_width = 1000;
        config.quality = 50;
        config.preserve_exif = false;
        touch(&config.input_root.join("wide.jpg"));

        let backend = MockBackend::with_dimensions(vec![dims(2000, 1000)]);
        run(&backend, &config).unwrap();

        let ops = backend.get_operations();
        assert!(matches!(
            &ops[1],
            RecordedOp::Resize {
                width: 1000,
                height: 500,
                quality: 50,
                auto_orient: false,
                keep_metadata: false,
                ..
            }
        ));
    }
}
