//! Renaming duplicates in place.

use crate::core::naming;
use crate::error::DetectError;
use std::fs;
use std::path::{Path, PathBuf};

/// Highest `-DUP-<n>` tried before giving up
const MAX_ATTEMPTS: u32 = 10_000;

/// Rename `path` to its first free `-DUP` name in the same directory.
///
/// `photo.jpg` becomes `photo-DUP.jpg`, or `photo-DUP-2.jpg`,
/// `photo-DUP-3.jpg`, ... when earlier names are taken. Nothing is ever
/// overwritten.
pub fn mark_duplicate(path: &Path) -> Result<PathBuf, DetectError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    for attempt in 1..=MAX_ATTEMPTS {
        let target = dir.join(naming::marked_name(&file_name, attempt));
        if target.exists() {
            tracing::debug!(target = %target.display(), "duplicate name taken, trying next");
            continue;
        }

        fs::rename(path, &target).map_err(|source| DetectError::Rename {
            from: path.to_path_buf(),
            to: target.clone(),
            source,
        })?;
        return Ok(target);
    }

    Err(DetectError::NoFreeName {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn renames_with_marker_before_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");
        fs::write(&path, b"x").unwrap();

        let renamed = mark_duplicate(&path).unwrap();

        assert_eq!(renamed, temp_dir.path().join("photo-DUP.jpg"));
        assert!(!path.exists());
        assert!(renamed.exists());
    }

    #[test]
    fn conflicts_get_numeric_disambiguator() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");
        fs::write(&path, b"new").unwrap();
        fs::write(temp_dir.path().join("photo-DUP.jpg"), b"first").unwrap();
        fs::write(temp_dir.path().join("photo-DUP-2.jpg"), b"second").unwrap();

        let renamed = mark_duplicate(&path).unwrap();

        assert_eq!(renamed, temp_dir.path().join("photo-DUP-3.jpg"));
        assert_eq!(fs::read(temp_dir.path().join("photo-DUP.jpg")).unwrap(), b"first");
        assert_eq!(fs::read(&renamed).unwrap(), b"new");
    }

    #[test]
    fn missing_source_is_a_rename_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = mark_duplicate(&temp_dir.path().join("gone.jpg"));
        assert!(matches!(result, Err(DetectError::Rename { .. })));
    }
}
