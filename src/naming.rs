//! File and display naming rules shared by both pipelines.
//!
//! Three conventions live here:
//! - **Rendition names**: every output is WebP, so the source extension is
//!   swapped for `.webp`. Sources that already are `.webp` keep their name
//!   unchanged to avoid `photo.webp.webp` doubling.
//! - **Photo titles**: the file stem with `_` and `-` normalized to spaces,
//!   then title-cased word by word. `late_night-walk.jpg` → "Late Night Walk".
//! - **Category labels**: lowercase directory names display-cased for the
//!   manifest. `animals` → "Animals".

use std::path::Path;

/// Output file name for a WebP rendition of `file_name`.
///
/// - `IMG_001.JPG` → `IMG_001.webp`
/// - `photo.webp` → `photo.webp` (reused unchanged)
/// - `archive.tar.gz` → `archive.tar.webp` (only the last extension is swapped)
pub fn rendition_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let already_webp = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("webp"));
    if already_webp {
        return file_name.to_string();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());
    format!("{stem}.webp")
}

/// Display title for a photo, derived from its file stem.
///
/// Underscores and dashes become spaces; each word is title-cased
/// (first letter upper, rest lower).
pub fn display_title(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display label for a category directory name: `animals` → "Animals".
pub fn display_category(name: &str) -> String {
    title_case_word(name)
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendition_swaps_extension() {
        assert_eq!(rendition_file_name("IMG_001.JPG"), "IMG_001.webp");
        assert_eq!(rendition_file_name("dawn.jpeg"), "dawn.webp");
        assert_eq!(rendition_file_name("graph.png"), "graph.webp");
    }

    #[test]
    fn rendition_keeps_existing_webp_name() {
        assert_eq!(rendition_file_name("photo.webp"), "photo.webp");
        assert_eq!(rendition_file_name("PHOTO.WEBP"), "PHOTO.WEBP");
    }

    #[test]
    fn rendition_swaps_only_last_extension() {
        assert_eq!(rendition_file_name("archive.tar.gz"), "archive.tar.webp");
    }

    #[test]
    fn rendition_without_extension_gains_one() {
        assert_eq!(rendition_file_name("photo"), "photo.webp");
    }

    #[test]
    fn title_from_underscored_stem() {
        assert_eq!(display_title("late_night_walk"), "Late Night Walk");
    }

    #[test]
    fn title_from_dashed_stem() {
        assert_eq!(display_title("red-fox"), "Red Fox");
    }

    #[test]
    fn title_mixed_separators() {
        assert_eq!(display_title("late_night-walk"), "Late Night Walk");
    }

    #[test]
    fn title_lowercases_shouty_stems() {
        assert_eq!(display_title("IMG_0042"), "Img 0042");
    }

    #[test]
    fn title_collapses_repeated_separators() {
        assert_eq!(display_title("a__b--c"), "A B C");
    }

    #[test]
    fn title_of_empty_stem_is_empty() {
        assert_eq!(display_title(""), "");
    }

    #[test]
    fn category_display_casing() {
        assert_eq!(display_category("animals"), "Animals");
        assert_eq!(display_category("PANOS"), "Panos");
        assert_eq!(display_category("misc"), "Misc");
    }
}
