//! # Similarity Module
//!
//! Scores two equal-sized grayscale windows and decides whether they are
//! the same picture.
//!
//! ## Metrics
//! - `WindowedSsim` - mean structural similarity (default)
//! - `RootMeanSquared` - plain per-pixel difference

mod rms;
mod ssim;

pub use rms::RootMeanSquared;
pub use ssim::WindowedSsim;

use crate::error::DetectError;
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// A similarity measure between two grayscale images
///
/// Implementations must be deterministic and return a value in `[0, 1]`,
/// where 1 means identical. Callers pass images of the same dimensions.
pub trait SimilarityMetric: Send + Sync {
    /// Score `a` against `b`
    fn score(&self, a: &GrayImage, b: &GrayImage) -> Result<f64, DetectError>;

    /// Short name used in logs and reports
    fn name(&self) -> &'static str;
}

/// Available metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Windowed SSIM
    #[default]
    Ssim,
    /// Root-mean-squared difference
    Rms,
}

impl MetricKind {
    /// Instantiate the metric
    pub fn build(self) -> Box<dyn SimilarityMetric> {
        match self {
            MetricKind::Ssim => Box::new(WindowedSsim),
            MetricKind::Rms => Box::new(RootMeanSquared),
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::Ssim => write!(f, "SSIM"),
            MetricKind::Rms => write!(f, "RMS"),
        }
    }
}

/// Outcome of one comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Same,
    Different,
}

/// Inclusive threshold: a score equal to the threshold counts as the same
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityThreshold {
    threshold: f64,
}

impl SimilarityThreshold {
    /// Create a threshold; range checking belongs to config validation
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Classify a score
    pub fn judge(&self, score: f64) -> Verdict {
        if score >= self.threshold {
            Verdict::Same
        } else {
            Verdict::Different
        }
    }

    /// The threshold value
    pub fn value(&self) -> f64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let threshold = SimilarityThreshold::new(0.95);
        assert_eq!(threshold.judge(0.95), Verdict::Same);
        assert_eq!(threshold.judge(0.97), Verdict::Same);
        assert_eq!(threshold.judge(0.9499), Verdict::Different);
    }

    #[test]
    fn zero_threshold_accepts_everything() {
        assert_eq!(SimilarityThreshold::new(0.0).judge(0.0), Verdict::Same);
    }

    #[test]
    fn metric_kind_builds_named_metric() {
        assert_eq!(MetricKind::Ssim.build().name(), "SSIM");
        assert_eq!(MetricKind::Rms.build().name(), "RMS");
        assert_eq!(MetricKind::default(), MetricKind::Ssim);
    }
}
