//! Output and marker filenames.
//!
//! Every name the workflow produces is derived here so the splitter, the
//! detector and the start-filename mapping agree on the layout:
//!
//! - `<stem><ext>` splits into `<stem>-L<ext>` and `<stem>-R<ext>`
//! - a duplicate becomes `<stem>-DUP<ext>`, then `<stem>-DUP-2<ext>`, ...

use std::path::Path;

/// Subfolder receiving left halves
pub const LEFT_SPLITS_DIR: &str = "_left_splits";
/// Subfolder receiving right halves
pub const RIGHT_SPLITS_DIR: &str = "_right_splits";
/// Marker inserted before the extension of a duplicate
pub const DUP_MARKER: &str = "-DUP";

/// Which half of a split an output holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn suffix(self) -> &'static str {
        match self {
            Side::Left => "-L",
            Side::Right => "-R",
        }
    }

    /// Subfolder of the target directory for this half
    pub fn dir_name(self) -> &'static str {
        match self {
            Side::Left => LEFT_SPLITS_DIR,
            Side::Right => RIGHT_SPLITS_DIR,
        }
    }
}

/// Split a filename into stem and extension (with its dot, or empty).
///
/// A leading dot belongs to the stem, so `.hidden` has no extension.
pub fn stem_and_ext(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}

/// Name of one half of a split: `page.png` -> `page-L.png`
pub fn split_name(file_name: &str, side: Side) -> String {
    let (stem, ext) = stem_and_ext(file_name);
    format!("{}{}{}", stem, side.suffix(), ext)
}

/// Name for the `attempt`-th try at marking a duplicate.
///
/// Attempt 1 is the bare marker, later attempts add a numeric disambiguator.
pub fn marked_name(file_name: &str, attempt: u32) -> String {
    let (stem, ext) = stem_and_ext(file_name);
    if attempt <= 1 {
        format!("{}{}{}", stem, DUP_MARKER, ext)
    } else {
        format!("{}{}-{}{}", stem, DUP_MARKER, attempt, ext)
    }
}

/// Whether a file already carries a duplicate marker (`-DUP` or `-DUP-<n>`)
pub fn is_marked(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let (stem, _) = stem_and_ext(name);

    match stem.rfind(DUP_MARKER) {
        Some(idx) => {
            let rest = &stem[idx + DUP_MARKER.len()..];
            match rest.strip_prefix('-') {
                None => rest.is_empty(),
                Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
            }
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_names_keep_extension() {
        assert_eq!(split_name("page-001.png", Side::Left), "page-001-L.png");
        assert_eq!(split_name("page-001.JPG", Side::Right), "page-001-R.JPG");
    }

    #[test]
    fn split_name_uses_last_dot() {
        assert_eq!(split_name("scan.v2.jpg", Side::Left), "scan.v2-L.jpg");
    }

    #[test]
    fn marked_names_disambiguate_from_second_attempt() {
        assert_eq!(marked_name("photo.jpg", 1), "photo-DUP.jpg");
        assert_eq!(marked_name("photo.jpg", 2), "photo-DUP-2.jpg");
        assert_eq!(marked_name("photo.jpg", 3), "photo-DUP-3.jpg");
    }

    #[test]
    fn recognises_markers() {
        assert!(is_marked(Path::new("/d/photo-DUP.jpg")));
        assert!(is_marked(Path::new("/d/photo-DUP-12.jpg")));
        assert!(!is_marked(Path::new("/d/photo.jpg")));
        assert!(!is_marked(Path::new("/d/photo-DUPLEX.jpg")));
        assert!(!is_marked(Path::new("/d/photo-DUP-.jpg")));
    }

    #[test]
    fn hidden_file_has_no_extension() {
        assert_eq!(stem_and_ext(".hidden"), (".hidden", ""));
        assert_eq!(stem_and_ext(".hidden.png"), (".hidden", ".png"));
    }
}
