//! # Splitter Module
//!
//! Cuts every image of a directory at a fixed pixel column. The left half
//! goes to `<dir>/_left_splits/<stem>-L<ext>`, the right half to
//! `<dir>/_right_splits/<stem>-R<ext>`, and the source is deleted once both
//! halves are written and verified.

mod executor;
mod types;

pub use executor::Splitter;
pub use types::{SplitConfig, SplitOutput, SplitReport, DEFAULT_SPLIT_WIDTH};
