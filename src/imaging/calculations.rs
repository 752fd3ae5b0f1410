//! Pure calculation functions for rendition dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! Both modes only ever scale down: a source that already fits is returned
//! unchanged, never upscaled.

/// Scale dimensions down to a maximum width, preserving aspect ratio.
///
/// Sources narrower than (or exactly at) the threshold are unchanged.
/// Wider sources come out at exactly `max_width`, with the height derived
/// from the same scale factor and rounded to the nearest pixel.
///
/// # Examples
/// ```
/// # use photo_mill::imaging::scale_to_max_width;
/// assert_eq!(scale_to_max_width((4000, 3000), 1920), (1920, 1440));
/// assert_eq!(scale_to_max_width((1200, 800), 1920), (1200, 800));
/// ```
pub fn scale_to_max_width(original: (u32, u32), max_width: u32) -> (u32, u32) {
    let (w, h) = original;
    if w <= max_width {
        return original;
    }
    let ratio = max_width as f64 / w as f64;
    (max_width, (h as f64 * ratio).round().max(1.0) as u32)
}

/// Scale dimensions down to fit within a square bounding box, preserving
/// aspect ratio.
///
/// Sources fitting the box in both dimensions are unchanged. Otherwise the
/// longer edge lands on the box edge and the shorter edge is rounded to the
/// nearest pixel.
///
/// # Examples
/// ```
/// # use photo_mill::imaging::fit_within_box;
/// assert_eq!(fit_within_box((2400, 1600), 1200), (1200, 800));
/// assert_eq!(fit_within_box((800, 600), 1200), (800, 600));
/// ```
pub fn fit_within_box(original: (u32, u32), box_edge: u32) -> (u32, u32) {
    let (w, h) = original;
    if w <= box_edge && h <= box_edge {
        return original;
    }
    let ratio = box_edge as f64 / w.max(h) as f64;
    (
        (w as f64 * ratio).round().max(1.0) as u32,
        (h as f64 * ratio).round().max(1.0) as u32,
    )
}
