//! Structural similarity via image-compare.
//!
//! Mean SSIM over the windows image-compare lays across the image
//! (`MSSIMSimple`). Windows that would run past the edge are clipped, so
//! images smaller than one window are still scored.

use super::SimilarityMetric;
use crate::error::DetectError;
use image::GrayImage;
use image_compare::Algorithm;

/// Structural similarity averaged over windows
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowedSsim;

impl SimilarityMetric for WindowedSsim {
    fn score(&self, a: &GrayImage, b: &GrayImage) -> Result<f64, DetectError> {
        let similarity = image_compare::gray_similarity_structure(&Algorithm::MSSIMSimple, a, b)
            .map_err(|e| DetectError::Compare(format!("SSIM failed: {:?}", e)))?;

        Ok(similarity.score.clamp(0.0, 1.0))
    }

    fn name(&self) -> &'static str {
        "SSIM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    /// Deterministic noise, independent between seeds
    fn pattern(width: u32, height: u32, seed: u32) -> GrayImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            let mut h = x.wrapping_mul(0x9E37_79B1)
                ^ y.wrapping_mul(0x85EB_CA77)
                ^ seed.wrapping_mul(0xC2B2_AE3D);
            h ^= h >> 15;
            h = h.wrapping_mul(0x2C1B_3C6D);
            h ^= h >> 12;
            Luma([(h >> 24) as u8])
        })
    }

    fn flat(width: u32, height: u32, value: u8) -> GrayImage {
        ImageBuffer::from_pixel(width, height, Luma([value]))
    }

    #[test]
    fn identical_images_score_one() {
        let image = pattern(40, 30, 1);
        let score = WindowedSsim.score(&image, &image.clone()).unwrap();
        assert!(score > 0.999, "score was {}", score);
    }

    #[test]
    fn identical_flat_images_score_one() {
        let image = flat(20, 20, 128);
        let score = WindowedSsim.score(&image, &image.clone()).unwrap();
        assert!(score > 0.999, "score was {}", score);
    }

    #[test]
    fn unrelated_patterns_score_low() {
        let score = WindowedSsim
            .score(&pattern(40, 30, 1), &pattern(40, 30, 7))
            .unwrap();
        assert!(score < 0.5, "score was {}", score);
    }

    #[test]
    fn small_perturbation_scores_high() {
        let a = pattern(40, 30, 1);
        let mut b = a.clone();
        b.put_pixel(20, 15, Luma([a.get_pixel(20, 15).0[0].wrapping_add(3)]));

        let score = WindowedSsim.score(&a, &b).unwrap();

        assert!(score > 0.95, "score was {}", score);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let a = pattern(16, 16, 4);
        let inverted: GrayImage = ImageBuffer::from_fn(16, 16, |x, y| {
            Luma([255 - a.get_pixel(x, y).0[0]])
        });

        let score = WindowedSsim.score(&a, &inverted).unwrap();

        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn mismatched_sizes_are_an_error() {
        let result = WindowedSsim.score(&flat(10, 10, 0), &flat(12, 10, 0));
        assert!(matches!(result, Err(DetectError::Compare(_))));
    }
}
