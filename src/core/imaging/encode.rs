//! Saving images without ever replacing an existing file.

use crate::error::CodecError;
use image::DynamicImage;
use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encode `image` to a new file at `path`, format chosen by extension.
///
/// The file is created with `create_new`, so an existing destination fails
/// with a [`CodecError::Io`] of kind `AlreadyExists` and is left untouched.
/// A file that was created but could not be fully written is removed.
pub fn save_new(image: &DynamicImage, path: &Path) -> Result<(), CodecError> {
    let format = image::ImageFormat::from_path(path).map_err(|e| CodecError::Save {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut writer = BufWriter::new(file);
    let written = encodable(image, format)
        .write_to(&mut writer, format)
        .map_err(|e| CodecError::Save {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
        .and_then(|()| {
            writer.flush().map_err(|source| CodecError::Io {
                path: path.to_path_buf(),
                source,
            })
        });

    if let Err(e) = &written {
        drop(writer);
        if let Err(remove_error) = fs::remove_file(path) {
            tracing::warn!(
                path = %path.display(),
                error = %remove_error,
                write_error = %e,
                "could not remove partially written image"
            );
        }
    }
    written
}

/// JPEG has no alpha channel and only 8-bit samples.
fn encodable(image: &DynamicImage, format: image::ImageFormat) -> Cow<'_, DynamicImage> {
    match (format, image) {
        (image::ImageFormat::Jpeg, DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_)) => {
            Cow::Borrowed(image)
        }
        (image::ImageFormat::Jpeg, _) => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        _ => Cow::Borrowed(image),
    }
}
