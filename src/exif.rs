//! EXIF capture-metadata extraction.
//!
//! Produces the four display fields the manifest carries for every photo:
//! capture date, ISO, aperture, and shutter speed. Values live partly in the
//! base TIFF directory (IFD0) and partly in the Exif sub-IFD (tag 34665);
//! the `exif` crate resolves both through the same lookup, with sub-IFD
//! values taking precedence on collision.
//!
//! Extraction is best-effort by contract: a photo without an EXIF block, or
//! with one we cannot parse, yields the sentinels (`"Unknown"` for the date,
//! `"N/A"` for the exposure fields) and never an error. Per-file processing
//! must not be aborted by bad metadata.
//!
//! ## Formatting rules
//!
//! - Date: raw `"YYYY:MM:DD HH:MM:SS"` → `"YYYY-MM-DD"`.
//! - Aperture: `2.0` → `f/2`, `2.8` → `f/2.8`.
//! - Shutter: `0.005` → `1/200`, `1.0` → `1s` (the sub-second branch is
//!   strict, so exactly one second is never rendered `1/1`), `2.5` → `2.5s`.

use exif::{In, Tag, Value};
use std::path::Path;

/// Sentinel for exposure fields that are absent or unreadable.
const NOT_AVAILABLE: &str = "N/A";

/// Capture date of a photo, used both for display and for manifest ordering.
///
/// A tagged type rather than a bare string so that ordering does not depend
/// on how the unknown sentinel happens to compare against digits: `Unknown`
/// is the smallest value, which puts it after every real date once the
/// manifest sorts descending. `Taken` dates compare lexically, which is
/// chronological for `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PhotoDate {
    Unknown,
    Taken(String),
}

impl PhotoDate {
    /// Build from a raw EXIF datetime (`"YYYY:MM:DD HH:MM:SS"`): the text
    /// before the first space with `:` swapped for `-`.
    pub fn from_raw(raw: &str) -> Self {
        let day = raw.split(' ').next().unwrap_or(raw).trim();
        if day.is_empty() {
            return PhotoDate::Unknown;
        }
        PhotoDate::Taken(day.replace(':', "-"))
    }
}

impl std::fmt::Display for PhotoDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoDate::Unknown => f.write_str("Unknown"),
            PhotoDate::Taken(day) => f.write_str(day),
        }
    }
}

impl serde::Serialize for PhotoDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The four display fields extracted from a photo's EXIF block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureMeta {
    pub date: PhotoDate,
    pub iso: String,
    pub aperture: String,
    pub shutter: String,
}

impl Default for CaptureMeta {
    fn default() -> Self {
        Self {
            date: PhotoDate::Unknown,
            iso: NOT_AVAILABLE.to_string(),
            aperture: NOT_AVAILABLE.to_string(),
            shutter: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Read capture metadata from an image file.
///
/// Any failure — missing file, no EXIF block, malformed directories —
/// degrades to the sentinel values.
pub fn read_capture(path: &Path) -> CaptureMeta {
    match open_exif(path) {
        Some(exif) => capture_from_exif(&exif),
        None => CaptureMeta::default(),
    }
}

/// Extract the four fields from an already-parsed EXIF block.
pub fn capture_from_exif(exif: &exif::Exif) -> CaptureMeta {
    let mut meta = CaptureMeta::default();

    let date_field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .or_else(|| exif.get_field(Tag::DateTime, In::PRIMARY));
    if let Some(field) = date_field
        && let Some(raw) = ascii_value(&field.value)
    {
        meta.date = PhotoDate::from_raw(&raw);
    }

    if let Some(field) = exif.get_field(Tag::PhotographicSensitivity, In::PRIMARY) {
        meta.iso = match uint_value(&field.value) {
            Some(v) => v.to_string(),
            None => raw_string(field),
        };
    }

    if let Some(field) = exif.get_field(Tag::FNumber, In::PRIMARY) {
        meta.aperture = match float_value(&field.value) {
            Some(v) => format_aperture(v),
            None => raw_string(field),
        };
    }

    if let Some(field) = exif.get_field(Tag::ExposureTime, In::PRIMARY) {
        meta.shutter = match float_value(&field.value) {
            Some(v) => format_shutter(v),
            None => raw_string(field),
        };
    }

    meta
}

/// Format an f-number: whole values drop the fraction (`f/2`), everything
/// else keeps one decimal place (`f/2.8`).
pub fn format_aperture(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("f/{}", value as i64)
    } else {
        format!("f/{value:.1}")
    }
}

/// Format an exposure time in seconds.
///
/// Sub-second exposures become unit fractions with a rounded denominator
/// (`0.005` → `1/200`). One second and longer render with an `s` suffix,
/// as an integer when whole (`2s`) and as the plain decimal otherwise
/// (`2.5s`). The comparison is strict, so `1.0` is `1s`, not `1/1`.
pub fn format_shutter(value: f64) -> String {
    if value < 1.0 {
        format!("1/{}", (1.0 / value).round() as i64)
    } else if value.fract() == 0.0 {
        format!("{}s", value as i64)
    } else {
        format!("{value}s")
    }
}

/// Read the orientation tag (274) from an image file, defaulting to 1
/// (upright) when absent or unreadable.
pub fn read_orientation(path: &Path) -> u32 {
    open_exif(path)
        .map(|exif| orientation_from_exif(&exif))
        .unwrap_or(1)
}

/// Orientation code from a parsed EXIF block, defaulting to 1.
pub fn orientation_from_exif(exif: &exif::Exif) -> u32 {
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| uint_value(&field.value))
        .unwrap_or(1)
}

/// The raw EXIF payload (the TIFF-structured buffer) of an image, for
/// carrying into re-encoded outputs. `None` when the file has no block.
pub fn raw_payload(path: &Path) -> Option<Vec<u8>> {
    open_exif(path).map(|exif| exif.buf().to_vec())
}

fn open_exif(path: &Path) -> Option<exif::Exif> {
    let file = std::fs::File::open(path).ok()?;
    let mut reader = std::io::BufReader::new(file);
    exif::Reader::new().read_from_container(&mut reader).ok()
}

/// First ASCII component of a value, as UTF-8 text.
fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(components) => components
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}

/// First component of an integer-typed value.
fn uint_value(value: &Value) -> Option<u32> {
    match value {
        Value::Short(v) => v.first().map(|&x| u32::from(x)),
        Value::Long(v) => v.first().copied(),
        _ => None,
    }
}

/// First component of any numeric value, as f64.
fn float_value(value: &Value) -> Option<f64> {
    match value {
        Value::Rational(v) => v.first().map(|r| r.to_f64()),
        Value::SRational(v) => v.first().map(|r| r.to_f64()),
        Value::Short(v) => v.first().map(|&x| f64::from(x)),
        Value::Long(v) => v.first().map(|&x| f64::from(x)),
        Value::Float(v) => v.first().map(|&x| f64::from(x)),
        Value::Double(v) => v.first().copied(),
        _ => None,
    }
}

/// Raw string form of a field's value, for the parse-failure fallback.
fn raw_string(field: &exif::Field) -> String {
    field
        .display_value()
        .to_string()
        .trim_matches('"')
        .to_string()
}
