//! File filtering logic for the scanner.

use super::ImageFormat;
use crate::core::naming;
use std::path::Path;

/// Decides which directory entries are input images
pub struct ImageFilter {
    include_hidden: bool,
    skip_marked: bool,
}

impl ImageFilter {
    /// Accept supported, visible images, marked duplicates included
    pub fn new() -> Self {
        Self {
            include_hidden: false,
            skip_marked: false,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Leave out files already carrying a `-DUP` marker
    pub fn without_marked(mut self, skip: bool) -> Self {
        self.skip_marked = skip;
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if !self.include_hidden && name.starts_with('.') {
            return false;
        }

        if !self.get_format(path).is_supported() {
            return false;
        }

        !(self.skip_marked && naming::is_marked(path))
    }

    /// Get the image format for a path
    pub fn get_format(&self, path: &Path) -> ImageFormat {
        path.extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_jpeg_and_png_any_case() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/scans/page.jpg")));
        assert!(filter.should_include(Path::new("/scans/page.JPEG")));
        assert!(filter.should_include(Path::new("/scans/page.PNG")));
    }

    #[test]
    fn filter_excludes_other_formats() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/scans/page.tiff")));
        assert!(!filter.should_include(Path::new("/scans/notes.txt")));
        assert!(!filter.should_include(Path::new("/scans/no_extension")));
    }

    #[test]
    fn filter_excludes_hidden_by_default() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/scans/.thumb.jpg")));
        assert!(ImageFilter::new()
            .with_hidden(true)
            .should_include(Path::new("/scans/.thumb.jpg")));
    }

    #[test]
    fn marked_files_are_kept_unless_asked() {
        let path = Path::new("/scans/page-DUP.png");
        assert!(ImageFilter::new().should_include(path));
        assert!(!ImageFilter::new().without_marked(true).should_include(path));
    }
}
