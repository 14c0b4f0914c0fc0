//! # Error Module
//!
//! Error types for the split and duplicate-marking workflow.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, dimensions, what went wrong
//! - **File-scoped** - only [`ConfigError`] stops a run; everything else
//!   is reported against one file and the batch carries on

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SplitDedupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    #[error("Duplicate detection error: {0}")]
    Detect(#[from] DetectError),

    #[error("Image error: {0}")]
    Codec(#[from] CodecError),
}

/// Invalid configuration, detected before any file is touched
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Invalid split width: {value} (must be a positive pixel column)")]
    InvalidSplitWidth { value: u32 },

    #[error("Invalid inner rectangle percentage: {value} (must be in (0, 1])")]
    InvalidInnerRect { value: f64 },

    #[error("Invalid SSIM threshold: {value} (must be in [0, 1])")]
    InvalidThreshold { value: f64 },
}

/// Errors that occur while listing a directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the image codec
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to load image {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("Failed to save image {path}: {reason}")]
    Save { path: PathBuf, reason: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resize failed: {0}")]
    Resize(String),
}

/// An image is the wrong shape for the requested operation
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Split column {split_width} is not inside an image {image_width}px wide")]
    SplitOutOfBounds { split_width: u32, image_width: u32 },

    #[error("Inner rectangle of {percent} leaves nothing of a {width}x{height} image")]
    EmptyWindow {
        width: u32,
        height: u32,
        percent: f64,
    },
}

/// Errors that occur while splitting one file
#[derive(Error, Debug)]
pub enum SplitError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Refusing to overwrite existing split output: {path}")]
    WriteConflict { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Split output missing or empty after write: {path}")]
    Verify { path: PathBuf },
}

/// Errors that occur while examining or marking one file
#[derive(Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No free duplicate name left for {path}")]
    NoFreeName { path: PathBuf },

    #[error("Comparison failed: {0}")]
    Compare(String),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SplitDedupError>;
