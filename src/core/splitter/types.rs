//! Types for the splitter module.

use crate::core::SkippedFile;
use crate::error::ConfigError;
use serde::Serialize;
use std::path::PathBuf;

/// Default split column, the width of the left page of a 3840px spread
pub const DEFAULT_SPLIT_WIDTH: u32 = 1920;

/// Configuration for a split run
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Pixel column where the right half starts
    pub split_width: u32,
    /// Skip files sorting before this name
    pub start_filename: Option<String>,
    /// Whether to include hidden files
    pub include_hidden: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            split_width: DEFAULT_SPLIT_WIDTH,
            start_filename: None,
            include_hidden: false,
        }
    }
}

impl SplitConfig {
    /// Reject parameters that make every split meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.split_width == 0 {
            return Err(ConfigError::InvalidSplitWidth {
                value: self.split_width,
            });
        }
        Ok(())
    }
}

/// One source file turned into two halves
#[derive(Debug, Clone, Serialize)]
pub struct SplitOutput {
    /// The deleted source
    pub source: PathBuf,
    /// Left half, columns `[0, split_width)`
    pub left: PathBuf,
    /// Right half, columns `[split_width, width)`
    pub right: PathBuf,
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
}

/// Result of splitting a directory
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    /// Directory that was split
    pub folder: PathBuf,
    /// Files split successfully, in processing order
    pub files_split: Vec<SplitOutput>,
    /// Files that were left in place
    pub skipped: Vec<SkippedFile>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
