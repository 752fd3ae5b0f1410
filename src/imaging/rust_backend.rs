//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | EXIF capture metadata | `kamadak-exif` via [`crate::exif`] |
//! | Auto-orientation | EXIF tag 274 + `image` rotate/flip ops |
//! | Resize | `DynamicImage::resize` with `Lanczos3` filter |
//! | Encode → WebP | `webp` crate (lossy) |
//! | EXIF preservation | RIFF rewrite in [`super::webp_meta`] |
//!
//! Decoder limits are disabled: panorama stitches easily exceed default
//! pixel guards and must still process.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::ResizeParams;
use super::webp_meta;
use crate::exif::{self, CaptureMeta};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image`, `webp`, and `kamadak-exif` crates.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk with decoder limits disabled.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut reader = ImageReader::open(path).map_err(BackendError::Io)?;
    reader.no_limits();
    reader.decode().map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })
}

/// Apply an EXIF orientation code to the decoded pixels.
pub fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.fliph().rotate90(),
        6 => img.rotate90(),
        7 => img.fliph().rotate270(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Encode to lossy WebP bytes at the given quality.
fn encode_webp(img: &DynamicImage, quality: u32) -> Vec<u8> {
    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(&rgba, rgba.width(), rgba.height())
            .encode(quality as f32)
            .to_vec()
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(&rgb, rgb.width(), rgb.height())
            .encode(quality as f32)
            .to_vec()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn read_capture(&self, path: &Path) -> CaptureMeta {
        exif::read_capture(path)
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let is_webp = params
            .output
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("webp"));
        if !is_webp {
            return Err(BackendError::ProcessingFailed(format!(
                "Unsupported output format: {}",
                params.output.display()
            )));
        }

        let mut img = load_image(&params.source)?;
        if params.auto_orient {
            img = apply_orientation(img, exif::read_orientation(&params.source));
        }
        // Bounds are a ceiling, not a target: sources that already fit are
        // encoded at their native size.
        if img.width() > params.width || img.height() > params.height {
            img = img.resize(params.width, params.height, FilterType::Lanczos3);
        }

        let mut bytes = encode_webp(&img, params.quality.value());
        if params.keep_metadata
            && let Some(payload) = exif::raw_payload(&params.source)
            && let Some(tagged) = webp_meta::embed_exif(&bytes, (img.width(), img.height()), &payload)
        {
            bytes = tagged;
        }

        std::fs::write(&params.output, &bytes).map_err(BackendError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use image::{ImageEncoder, RgbImage};

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        image::codecs::jpeg::JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    /// Minimal raw EXIF block: a little-endian TIFF whose only entry is
    /// the orientation tag (274) with the given code.
    fn orientation_tiff(code: u16) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II");
        tiff.extend_from_slice(&42u16.to_le_bytes());
        tiff.extend_from_slice(&8u32.to_le_bytes());
        tiff.extend_from_slice(&1u16.to_le_bytes()); // one entry
        tiff.extend_from_slice(&274u16.to_le_bytes());
        tiff.extend_from_slice(&3u16.to_le_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&code.to_le_bytes());
        tiff.extend_from_slice(&[0, 0]); // value padding
        tiff.extend_from_slice(&0u32.to_le_bytes()); // no next IFD
        tiff
    }

    /// Create a JPEG carrying the given raw EXIF block, by splicing an APP1
    /// segment right after the encoder's SOI marker.
    fn create_test_jpeg_with_exif(path: &Path, width: u32, height: u32, tiff: &[u8]) {
        create_test_jpeg(path, width, height);
        let plain = std::fs::read(path).unwrap();
        assert_eq!(&plain[0..2], &[0xFF, 0xD8]);

        let mut app1 = Vec::new();
        app1.extend_from_slice(b"Exif\0\0");
        app1.extend_from_slice(tiff);

        let mut spliced = Vec::with_capacity(plain.len() + app1.len() + 4);
        spliced.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xE1]);
        spliced.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
        spliced.extend_from_slice(&app1);
        spliced.extend_from_slice(&plain[2..]);
        std::fs::write(path, spliced).unwrap();
    }

    fn resize_params(source: &Path, output: &Path, bounds: u32) -> ResizeParams {
        ResizeParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            width: bounds,
            height: bounds,
            quality: Quality::new(75),
            auto_orient: false,
            keep_metadata: false,
        }
    }

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let dims = backend.identify(&path).unwrap();
        assert_eq!(dims.width, 200);
        assert_eq!(dims.height, 150);
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let backend = RustBackend::new();
        assert!(backend.identify(Path::new("/nonexistent/image.jpg")).is_err());
    }

    #[test]
    fn resize_scales_down_within_bounds() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 400, 300);

        let output = tmp.path().join("out.webp");
        let backend = RustBackend::new();
        backend
            .resize(&resize_params(&source, &output, 200))
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (200, 150));
    }

    #[test]
    fn resize_never_upscales_small_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 120, 90);

        let output = tmp.path().join("out.webp");
        let backend = RustBackend::new();
        backend
            .resize(&resize_params(&source, &output, 600))
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (120, 90));
    }

    #[test]
    fn resize_rejects_non_webp_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 100, 100);

        let backend = RustBackend::new();
        let result = backend.resize(&resize_params(&source, &tmp.path().join("out.avif"), 50));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn resize_corrupt_source_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpg");
        std::fs::write(&source, b"definitely not a jpeg").unwrap();

        let backend = RustBackend::new();
        let result = backend.resize(&resize_params(&source, &tmp.path().join("out.webp"), 100));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn auto_orient_rotates_sideways_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("rotated.jpg");
        create_test_jpeg_with_exif(&source, 300, 200, &orientation_tiff(6));

        let output = tmp.path().join("out.webp");
        let backend = RustBackend::new();
        let mut params = resize_params(&source, &output, 1000);
        params.auto_orient = true;
        backend.resize(&params).unwrap();

        // Code 6 is a 90° clockwise rotation: dimensions swap.
        assert_eq!(image::image_dimensions(&output).unwrap(), (200, 300));
    }

    #[test]
    fn keep_metadata_embeds_exif_chunk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("tagged.jpg");
        create_test_jpeg_with_exif(&source, 64, 48, &orientation_tiff(1));

        let output = tmp.path().join("out.webp");
        let backend = RustBackend::new();
        let mut params = resize_params(&source, &output, 100);
        params.keep_metadata = true;
        backend.resize(&params).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert!(
            bytes.windows(4).any(|w| w == b"EXIF"),
            "expected an EXIF chunk in the output container"
        );
        // Still decodable after the container rewrite.
        assert_eq!(image::image_dimensions(&output).unwrap(), (64, 48));
    }

    #[test]
    fn strip_metadata_leaves_no_exif_chunk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("tagged.jpg");
        create_test_jpeg_with_exif(&source, 64, 48, &orientation_tiff(1));

        let output = tmp.path().join("out.webp");
        let backend = RustBackend::new();
        backend
            .resize(&resize_params(&source, &output, 100))
            .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(!bytes.windows(4).any(|w| w == b"EXIF"));
    }

    #[test]
    fn apply_orientation_codes() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(30, 20));
        let dims = |img: &DynamicImage| (img.width(), img.height());

        assert_eq!(dims(&apply_orientation(img.clone(), 1)), (30, 20));
        assert_eq!(dims(&apply_orientation(img.clone(), 3)), (30, 20));
        assert_eq!(dims(&apply_orientation(img.clone(), 6)), (20, 30));
        assert_eq!(dims(&apply_orientation(img.clone(), 8)), (20, 30));
        // Unknown codes are a no-op
        assert_eq!(dims(&apply_orientation(img, 99)), (30, 20));
    }
}
