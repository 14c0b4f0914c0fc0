//! The centred region of interest used for comparison.

use crate::error::GeometryError;
use image::{DynamicImage, GenericImageView, GrayImage, Luma, RgbImage};
use serde::Serialize;

/// A centred rectangle covering `percent` of an image's width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonWindow {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl ComparisonWindow {
    /// Derive the window for an image of `width` x `height`.
    ///
    /// Sizes are truncated towards zero and the margin is split evenly, with
    /// the odd pixel going to the right/bottom.
    pub fn centered(width: u32, height: u32, percent: f64) -> Result<Self, GeometryError> {
        let inner_width = (width as f64 * percent) as u32;
        let inner_height = (height as f64 * percent) as u32;

        if inner_width == 0 || inner_height == 0 || inner_width > width || inner_height > height {
            return Err(GeometryError::EmptyWindow {
                width,
                height,
                percent,
            });
        }

        Ok(Self {
            left: (width - inner_width) / 2,
            top: (height - inner_height) / 2,
            width: inner_width,
            height: inner_height,
        })
    }

    /// Grayscale copy of the window's pixels
    pub fn extract(&self, image: &DynamicImage) -> GrayImage {
        match image.crop_imm(self.left, self.top, self.width, self.height) {
            DynamicImage::ImageLuma8(gray) => gray,
            other => luma_601(&other.to_rgb8()),
        }
    }
}

/// ITU-R BT.601 luma in 16-bit fixed point, rounded
fn luma_601(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000;
        Luma([(luma >> 16) as u8])
    })
}

/// Convert `image` to grayscale and cut out its centred `percent` window
pub fn grayscale_window(image: &DynamicImage, percent: f64) -> Result<GrayImage, GeometryError> {
    let (width, height) = image.dimensions();
    let window = ComparisonWindow::centered(width, height, percent)?;
    Ok(window.extract(image))
}
