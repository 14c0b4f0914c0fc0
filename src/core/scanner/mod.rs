//! # Scanner Module
//!
//! Lists the image files of one directory in lexical filename order.
//!
//! Only the directory itself is read; the `_left_splits`/`_right_splits`
//! subfolders are never picked up as input.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//!
//! ## Example
//! ```rust,ignore
//! use split_dedup::core::scanner::{DirectoryScanner, ScanConfig};
//!
//! let scanner = DirectoryScanner::new(ScanConfig::default());
//! let files = scanner.scan("/scans".as_ref(), Some("page-005.png"))?;
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{DirectoryScanner, ScanConfig};

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An image file discovered in a target directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Path to the file
    pub path: PathBuf,
    /// Filename, used for ordering and start-filename matching
    pub file_name: String,
    /// Format detected from the extension
    pub format: ImageFormat,
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            _ => ImageFormat::Unknown,
        }
    }

    /// Check if this format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}

/// Fail unless `dir` exists and is a directory
pub fn require_directory(dir: &Path) -> Result<(), ConfigError> {
    if !dir.exists() {
        return Err(ConfigError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(ConfigError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Keep only files whose name sorts at or after `start`.
///
/// `files` must already be sorted; an empty or missing start keeps everything.
pub fn skip_to_start(files: Vec<ImageFile>, start: Option<&str>) -> Vec<ImageFile> {
    match start.filter(|s| !s.is_empty()) {
        Some(start) => files
            .into_iter()
            .filter(|f| f.file_name.as_str() >= start)
            .collect(),
        None => files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> ImageFile {
        ImageFile {
            path: PathBuf::from("/scans").join(name),
            file_name: name.to_string(),
            format: ImageFormat::Png,
        }
    }

    #[test]
    fn image_format_from_extension_any_case() {
        assert_eq!(ImageFormat::from_extension("jpg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("JPEG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("Png"), ImageFormat::Png);
    }

    #[test]
    fn unknown_format_is_not_supported() {
        assert_eq!(ImageFormat::from_extension("gif"), ImageFormat::Unknown);
        assert!(!ImageFormat::Unknown.is_supported());
        assert!(ImageFormat::Png.is_supported());
    }

    #[test]
    fn skip_to_start_keeps_start_and_later() {
        let files: Vec<_> = (1..=10).map(|i| file(&format!("f{:02}.png", i))).collect();

        let kept = skip_to_start(files, Some("f05.png"));

        let names: Vec<_> = kept.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names.first(), Some(&"f05.png"));
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn skip_to_start_with_absent_name_starts_at_next_in_order() {
        let files = vec![file("a.png"), file("c.png"), file("e.png")];

        let kept = skip_to_start(files, Some("b.png"));

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].file_name, "c.png");
    }

    #[test]
    fn require_directory_rejects_missing_path() {
        let result = require_directory(Path::new("/nonexistent/scans/12345"));
        assert!(matches!(result, Err(ConfigError::DirectoryNotFound { .. })));
    }

    #[test]
    fn empty_start_keeps_everything() {
        let files = vec![file("a.png"), file("b.png")];
        assert_eq!(skip_to_start(files.clone(), Some("")).len(), 2);
        assert_eq!(skip_to_start(files, None).len(), 2);
    }
}
