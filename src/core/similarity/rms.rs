//! Root-mean-squared pixel difference via image-compare.

use super::SimilarityMetric;
use crate::error::DetectError;
use image::GrayImage;
use image_compare::Algorithm;

/// `1 - RMS(a - b)` on pixel values scaled to `[0, 1]`
///
/// Cheaper than SSIM and blind to structure: a uniform brightness shift
/// costs as much as the same amount of noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootMeanSquared;

impl SimilarityMetric for RootMeanSquared {
    fn score(&self, a: &GrayImage, b: &GrayImage) -> Result<f64, DetectError> {
        let similarity = image_compare::gray_similarity_structure(&Algorithm::RootMeanSquared, a, b)
            .map_err(|e| DetectError::Compare(format!("RMS failed: {:?}", e)))?;

        Ok(similarity.score.clamp(0.0, 1.0))
    }

    fn name(&self) -> &'static str {
        "RMS"
    }
}
