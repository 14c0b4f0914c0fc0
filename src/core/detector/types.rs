//! Types for the duplicate detector.

use crate::core::similarity::{MetricKind, Verdict};
use crate::core::SkippedFile;
use crate::error::ConfigError;
use serde::Serialize;
use std::path::PathBuf;

/// Default share of width and height kept for comparison
pub const DEFAULT_INNER_RECT_PERCENT: f64 = 0.90;
/// Default similarity at or above which two images are the same
pub const DEFAULT_SSIM_THRESHOLD: f64 = 0.95;

/// Configuration for a detection run
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Centred fraction of each image compared, in (0, 1]
    pub inner_rect_percent: f64,
    /// Inclusive similarity threshold, in [0, 1]
    pub ssim_threshold: f64,
    /// Skip files sorting before this name
    pub start_filename: Option<String>,
    /// Similarity metric
    pub metric: MetricKind,
    /// Whether to include hidden files
    pub include_hidden: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            inner_rect_percent: DEFAULT_INNER_RECT_PERCENT,
            ssim_threshold: DEFAULT_SSIM_THRESHOLD,
            start_filename: None,
            metric: MetricKind::default(),
            include_hidden: false,
        }
    }
}

impl DetectorConfig {
    /// Reject out-of-range (or NaN) parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        let percent = self.inner_rect_percent;
        if !(percent > 0.0 && percent <= 1.0) {
            return Err(ConfigError::InvalidInnerRect { value: percent });
        }
        if !(0.0..=1.0).contains(&self.ssim_threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.ssim_threshold,
            });
        }
        Ok(())
    }
}

/// One candidate scored against the reference
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub reference: PathBuf,
    pub candidate: PathBuf,
    pub score: f64,
    pub verdict: Verdict,
}

/// A candidate renamed as a duplicate
#[derive(Debug, Clone, Serialize)]
pub struct MarkedDuplicate {
    /// Path before the rename
    pub original: PathBuf,
    /// Path after the rename
    pub renamed: PathBuf,
    /// The reference it duplicates
    pub reference: PathBuf,
}

/// Result of scanning one directory for duplicates
#[derive(Debug, Clone, Serialize)]
pub struct DetectReport {
    /// Directory that was scanned
    pub folder: PathBuf,
    /// Files in the candidate list
    pub files_examined: usize,
    /// Every comparison, in order
    pub comparisons: Vec<Comparison>,
    /// Files renamed in this run
    pub marked: Vec<MarkedDuplicate>,
    /// Already-marked files judged duplicates again and left as they were
    pub already_marked: Vec<PathBuf>,
    /// Files that could not be examined or renamed
    pub skipped: Vec<SkippedFile>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl DetectReport {
    /// A report for a folder with nothing to do
    pub fn empty(folder: PathBuf) -> Self {
        Self {
            folder,
            files_examined: 0,
            comparisons: Vec::new(),
            marked: Vec::new(),
            already_marked: Vec::new(),
            skipped: Vec::new(),
            duration_ms: 0,
        }
    }
}
