//! # split-dedup CLI
//!
//! Command-line interface for the splitter and duplicate detector.
//!
//! ## Usage
//! ```bash
//! split-dedup process --path ~/Scans --split-width 1920
//! split-dedup dedup --path ~/Scans/_left_splits --ssim-threshold 0.9
//! ```

mod cli;

use split_dedup::Result;

fn main() -> Result<()> {
    cli::run()
}
