//! Directory listing implementation using walkdir.

use super::{filter::ImageFilter, skip_to_start, ImageFile};
use crate::error::ScanError;
use std::path::Path;
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to include hidden files
    pub include_hidden: bool,
    /// Whether to leave out files already marked `-DUP`
    pub skip_marked: bool,
}

/// Lists the images directly inside one directory
pub struct DirectoryScanner {
    filter: ImageFilter,
}

impl DirectoryScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let filter = ImageFilter::new()
            .with_hidden(config.include_hidden)
            .without_marked(config.skip_marked);
        Self { filter }
    }

    /// List supported images in `dir`, sorted by filename, starting at `start`.
    ///
    /// Failing to open `dir` itself is an error; an unreadable entry inside it
    /// is logged and skipped.
    pub fn scan(&self, dir: &Path, start: Option<&str>) -> Result<Vec<ImageFile>, ScanError> {
        let mut files = Vec::new();

        for entry_result in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let path = dir.to_path_buf();
                    return Err(match e.io_error().map(|io| io.kind()) {
                        Some(std::io::ErrorKind::PermissionDenied) => {
                            ScanError::PermissionDenied { path }
                        }
                        _ => ScanError::ReadDirectory {
                            path,
                            source: std::io::Error::other(e.to_string()),
                        },
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.filter.should_include(path) {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!(path = %path.display(), "skipping non UTF-8 filename");
                continue;
            };

            files.push(ImageFile {
                path: path.to_path_buf(),
                file_name: file_name.to_string(),
                format: self.filter.get_format(path),
            });
        }

        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        Ok(skip_to_start(files, start))
    }
}
