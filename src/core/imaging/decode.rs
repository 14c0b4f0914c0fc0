//! Image decoding with a JPEG fast path.
//!
//! Uses zune-jpeg for JPEG files (1.5-2x faster than image crate),
//! falls back to image crate for everything else and for any JPEG
//! zune-jpeg refuses.

use crate::core::scanner::ImageFormat;
use crate::error::CodecError;
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use std::fs;
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Loads images from disk
pub struct Decoder;

impl Decoder {
    /// Decode the image at `path`.
    ///
    /// An unreadable file or one that is not a valid image is a
    /// [`CodecError::Load`].
    pub fn load(path: &Path) -> Result<DynamicImage, CodecError> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown);

        match format {
            ImageFormat::Jpeg => Self::decode_jpeg(path).or_else(|_| Self::decode_fallback(path)),
            _ => Self::decode_fallback(path),
        }
    }

    fn decode_jpeg(path: &Path) -> Result<DynamicImage, CodecError> {
        let file_bytes = fs::read(path).map_err(|e| CodecError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(&file_bytes, options);

        let pixels = decoder.decode().map_err(|e| CodecError::Load {
            path: path.to_path_buf(),
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| CodecError::Load {
            path: path.to_path_buf(),
            reason: "missing JPEG header info".to_string(),
        })?;
        let width = info.width as u32;
        let height = info.height as u32;

        let buffer_error = || CodecError::Load {
            path: path.to_path_buf(),
            reason: "decoded pixel count does not match dimensions".to_string(),
        };

        match decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB) {
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(buffer_error)?;
                Ok(DynamicImage::ImageRgb8(buffer))
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(buffer_error)?;
                Ok(DynamicImage::ImageRgba8(buffer))
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(buffer_error)?;
                Ok(DynamicImage::ImageLuma8(buffer))
            }
            _ => Self::decode_fallback(path),
        }
    }

    fn decode_fallback(path: &Path) -> Result<DynamicImage, CodecError> {
        image::open(path).map_err(|e| CodecError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
