//! # Core Module
//!
//! The split and duplicate-marking engine, independent of any front end.
//!
//! ## Modules
//! - `scanner` - Lists the images of one directory in filename order
//! - `imaging` - Decoding, encoding, resizing and the comparison window
//! - `similarity` - Scores two grayscale windows
//! - `splitter` - Cuts images into left/right halves
//! - `detector` - Marks near-duplicates by renaming them
//! - `workflow` - Runs the split and both detection passes in order

pub mod detector;
pub mod imaging;
pub mod naming;
pub mod scanner;
pub mod similarity;
pub mod splitter;
pub mod workflow;

use serde::Serialize;
use std::path::PathBuf;

// Re-export commonly used types
pub use detector::{DetectReport, DetectorConfig, DuplicateDetector};
pub use scanner::ImageFile;
pub use similarity::{MetricKind, SimilarityMetric, Verdict};
pub use splitter::{SplitConfig, SplitReport, Splitter};
pub use workflow::{Workflow, WorkflowConfig, WorkflowResult};

/// A file a run left alone, with the reason
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub message: String,
}
