//! SIMD-accelerated grayscale resizing.
//!
//! Uses fast_image_resize, which picks AVX2/NEON kernels when available.
//! Only needed when two comparison windows differ in size.

use crate::error::CodecError;
use fast_image_resize::{images::Image, PixelType, ResizeOptions, Resizer};
use image::{GrayImage, ImageBuffer, Luma};

/// Reusable grayscale resizer
pub struct GrayResizer {
    resizer: Resizer,
}

impl GrayResizer {
    /// Create a new resizer
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Resize `gray` to exactly `width` x `height`.
    ///
    /// Returns a copy unchanged when the size already matches.
    pub fn resize(
        &mut self,
        gray: &GrayImage,
        width: u32,
        height: u32,
    ) -> Result<GrayImage, CodecError> {
        if gray.dimensions() == (width, height) {
            return Ok(gray.clone());
        }

        if gray.width() == 0 || gray.height() == 0 || width == 0 || height == 0 {
            return Err(CodecError::Resize(format!(
                "cannot resize {}x{} to {}x{}",
                gray.width(),
                gray.height(),
                width,
                height
            )));
        }

        let src_image =
            Image::from_vec_u8(gray.width(), gray.height(), gray.as_raw().clone(), PixelType::U8)
                .map_err(|e| CodecError::Resize(format!("bad source buffer: {}", e)))?;

        let mut dst_image = Image::new(width, height, PixelType::U8);

        let options = ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
            fast_image_resize::FilterType::Bilinear,
        ));

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| CodecError::Resize(e.to_string()))?;

        let resized: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(width, height, dst_image.into_vec())
                .ok_or_else(|| CodecError::Resize("bad destination buffer".to_string()))?;

        Ok(resized)
    }
}

impl Default for GrayResizer {
    fn default() -> Self {
        Self::new()
    }
}
