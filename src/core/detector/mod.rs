//! # Detector Module
//!
//! Walks a directory in filename order and renames near-duplicates to
//! `<stem>-DUP<ext>`. Each candidate is compared with the current
//! reference over a centred inner window; the reference only moves on
//! when a candidate is judged different.

mod executor;
mod marking;
mod types;

pub use executor::DuplicateDetector;
pub use marking::mark_duplicate;
pub use types::{
    Comparison, DetectReport, DetectorConfig, MarkedDuplicate, DEFAULT_INNER_RECT_PERCENT,
    DEFAULT_SSIM_THRESHOLD,
};
