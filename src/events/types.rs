//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while splitting and detecting duplicates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Splitter events
    Split(SplitEvent),
    /// Duplicate detector events
    Detect(DetectEvent),
    /// Workflow-level events
    Workflow(WorkflowEvent),
}

/// Events from the splitter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SplitEvent {
    /// Splitting has started
    Started { folder: PathBuf, total_files: usize },
    /// Progress update, sent before each file
    Progress(FileProgress),
    /// A file was split and its source removed
    FileSplit {
        source: PathBuf,
        left: PathBuf,
        right: PathBuf,
    },
    /// A file was left untouched
    Skipped { path: PathBuf, message: String },
    /// Splitting completed
    Completed { files_split: usize, skipped: usize },
}

/// Events from the duplicate detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DetectEvent {
    /// Detection has started in a folder
    Started { folder: PathBuf, total_files: usize },
    /// Progress update, sent before each file
    Progress(FileProgress),
    /// A candidate was scored against the current reference
    Compared {
        reference: PathBuf,
        candidate: PathBuf,
        score: f64,
    },
    /// A candidate was marked as a duplicate
    DuplicateMarked {
        original: PathBuf,
        renamed: PathBuf,
        reference: PathBuf,
    },
    /// The reference moved to a new image
    ReferenceChanged { path: PathBuf },
    /// A file could not be examined; the previous reference is kept
    Skipped { path: PathBuf, message: String },
    /// Detection completed
    Completed {
        folder: PathBuf,
        duplicates_marked: usize,
    },
}

/// Progress through a sorted file list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProgress {
    /// Files handled so far, including the current one
    pub completed: usize,
    /// Files in the list
    pub total: usize,
    /// The file being handled
    pub current_path: PathBuf,
}

/// Workflow-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkflowEvent {
    /// Workflow has started
    Started { path: PathBuf },
    /// Moving to a new stage
    StageChanged { stage: WorkflowStage },
    /// Workflow completed
    Completed { summary: WorkflowSummary },
}

/// Stages of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStage {
    Splitting,
    DetectingLeft,
    DetectingRight,
}

/// Summary of a full workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSummary {
    /// Source files split into halves
    pub files_split: usize,
    /// Duplicates marked across both halves
    pub duplicates_marked: usize,
    /// Files skipped by any stage
    pub files_skipped: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowStage::Splitting => write!(f, "Splitting"),
            WorkflowStage::DetectingLeft => write!(f, "Detecting (left)"),
            WorkflowStage::DetectingRight => write!(f, "Detecting (right)"),
        }
    }
}
