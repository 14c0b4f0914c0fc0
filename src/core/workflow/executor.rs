//! Workflow execution implementation.

use crate::core::detector::{
    DetectReport, DetectorConfig, DuplicateDetector, DEFAULT_INNER_RECT_PERCENT,
    DEFAULT_SSIM_THRESHOLD,
};
use crate::core::naming::{self, Side};
use crate::core::scanner;
use crate::core::similarity::MetricKind;
use crate::core::splitter::{SplitConfig, SplitReport, Splitter, DEFAULT_SPLIT_WIDTH};
use crate::error::SplitDedupError;
use crate::events::{null_sender, Event, EventSender, WorkflowEvent, WorkflowStage, WorkflowSummary};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Result of a full workflow run
#[derive(Debug, Serialize)]
pub struct WorkflowResult {
    /// What the splitter did
    pub split: SplitReport,
    /// Duplicate detection over `_left_splits`
    pub left: DetectReport,
    /// Duplicate detection over `_right_splits`
    pub right: DetectReport,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl WorkflowResult {
    /// Summarise the run for the completion event
    pub fn summary(&self) -> WorkflowSummary {
        WorkflowSummary {
            files_split: self.split.files_split.len(),
            duplicates_marked: self.left.marked.len() + self.right.marked.len(),
            files_skipped: self.split.skipped.len()
                + self.left.skipped.len()
                + self.right.skipped.len(),
            duration_ms: self.duration_ms,
        }
    }
}

/// Configuration for the workflow
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Directory to process
    pub path: PathBuf,
    /// Skip source files sorting before this name
    pub start_filename: Option<String>,
    /// Pixel column where the right half starts
    pub split_width: u32,
    /// Centred fraction of each half compared
    pub inner_rect_percent: f64,
    /// Inclusive similarity threshold
    pub ssim_threshold: f64,
    /// Similarity metric
    pub metric: MetricKind,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            start_filename: None,
            split_width: DEFAULT_SPLIT_WIDTH,
            inner_rect_percent: DEFAULT_INNER_RECT_PERCENT,
            ssim_threshold: DEFAULT_SSIM_THRESHOLD,
            metric: MetricKind::default(),
        }
    }
}

impl WorkflowConfig {
    /// Check every stage's parameters and the target directory
    pub fn validate(&self) -> Result<(), SplitDedupError> {
        self.split_config().validate()?;
        self.detector_config(Side::Left).validate()?;
        scanner::require_directory(&self.path)?;
        Ok(())
    }

    fn split_config(&self) -> SplitConfig {
        SplitConfig {
            split_width: self.split_width,
            start_filename: self.start_filename.clone(),
            ..Default::default()
        }
    }

    /// The start filename names a source, so each side starts at that
    /// source's half.
    fn detector_config(&self, side: Side) -> DetectorConfig {
        DetectorConfig {
            inner_rect_percent: self.inner_rect_percent,
            ssim_threshold: self.ssim_threshold,
            start_filename: self
                .start_filename
                .as_deref()
                .map(|name| naming::split_name(name, side)),
            metric: self.metric,
            ..Default::default()
        }
    }
}

/// Builder for workflow configuration
pub struct WorkflowBuilder {
    config: WorkflowConfig,
}

impl WorkflowBuilder {
    /// Create a new workflow builder
    pub fn new() -> Self {
        Self {
            config: WorkflowConfig::default(),
        }
    }

    /// Set the directory to process
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Start at this filename
    pub fn start_filename(mut self, name: Option<String>) -> Self {
        self.config.start_filename = name;
        self
    }

    /// Set the split column
    pub fn split_width(mut self, width: u32) -> Self {
        self.config.split_width = width;
        self
    }

    /// Set the inner rectangle percentage
    pub fn inner_rect_percent(mut self, percent: f64) -> Self {
        self.config.inner_rect_percent = percent;
        self
    }

    /// Set the similarity threshold
    pub fn ssim_threshold(mut self, threshold: f64) -> Self {
        self.config.ssim_threshold = threshold;
        self
    }

    /// Set the similarity metric
    pub fn metric(mut self, metric: MetricKind) -> Self {
        self.config.metric = metric;
        self
    }

    /// Build the workflow
    pub fn build(self) -> Workflow {
        Workflow {
            config: self.config,
        }
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Split, then mark duplicates on each side
pub struct Workflow {
    config: WorkflowConfig,
}

impl Workflow {
    /// Create a new workflow builder
    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    /// Create a workflow from a finished config
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// The configuration this workflow runs with
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Run the workflow without events
    pub fn run(&self) -> Result<WorkflowResult, SplitDedupError> {
        self.run_with_events(&null_sender())
    }

    /// Run the workflow with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<WorkflowResult, SplitDedupError> {
        let start_time = Instant::now();
        self.config.validate()?;
        let dir = &self.config.path;

        tracing::info!(path = %dir.display(), "workflow started");
        events.send(Event::Workflow(WorkflowEvent::Started { path: dir.clone() }));

        // Stage 1: Splitting
        events.send(Event::Workflow(WorkflowEvent::StageChanged {
            stage: WorkflowStage::Splitting,
        }));
        let split = Splitter::new(self.config.split_config()).run_with_events(dir, events)?;

        // Stages 2 and 3: one detection pass per side
        let left = self.detect_side(Side::Left, WorkflowStage::DetectingLeft, events)?;
        let right = self.detect_side(Side::Right, WorkflowStage::DetectingRight, events)?;

        let result = WorkflowResult {
            split,
            left,
            right,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        let summary = result.summary();
        tracing::info!(
            files_split = summary.files_split,
            duplicates_marked = summary.duplicates_marked,
            files_skipped = summary.files_skipped,
            "workflow completed"
        );
        events.send(Event::Workflow(WorkflowEvent::Completed { summary }));

        Ok(result)
    }

    fn detect_side(
        &self,
        side: Side,
        stage: WorkflowStage,
        events: &EventSender,
    ) -> Result<DetectReport, SplitDedupError> {
        events.send(Event::Workflow(WorkflowEvent::StageChanged { stage }));

        let folder = self.config.path.join(side.dir_name());
        if !folder.is_dir() {
            tracing::info!(folder = %folder.display(), "no split output, nothing to detect");
            return Ok(DetectReport::empty(folder));
        }

        DuplicateDetector::new(self.config.detector_config(side)).run_with_events(&folder, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::naming::{LEFT_SPLITS_DIR, RIGHT_SPLITS_DIR};
    use crate::events::EventChannel;
    use image::{GrayImage, ImageBuffer, Luma};
    use std::path::Path;
    use tempfile::TempDir;

    /// A spread whose left page is flat and whose right page carries `seed`
    fn create_spread(dir: &Path, name: &str, seed: u32) {
        let img: GrayImage = ImageBuffer::from_fn(40, 20, |x, y| {
            if x < 20 {
                Luma([128])
            } else {
                let mut h = x.wrapping_mul(0x9E37_79B1) ^ seed.wrapping_mul(0xC2B2_AE3D);
                h ^= y.wrapping_mul(0x85EB_CA77);
                h ^= h >> 15;
                h = h.wrapping_mul(0x2C1B_3C6D);
                h ^= h >> 12;
                Luma([(h >> 24) as u8])
            }
        });
        img.save(dir.join(name)).unwrap();
    }

    fn workflow(dir: &Path) -> Workflow {
        Workflow::builder().path(dir).split_width(20).build()
    }

    #[test]
    fn builder_sets_every_field() {
        let workflow = Workflow::builder()
            .path("/scans")
            .start_filename(Some("p5.png".to_string()))
            .split_width(100)
            .inner_rect_percent(0.5)
            .ssim_threshold(0.8)
            .metric(MetricKind::Rms)
            .build();

        let config = workflow.config();
        assert_eq!(config.path, PathBuf::from("/scans"));
        assert_eq!(config.start_filename.as_deref(), Some("p5.png"));
        assert_eq!(config.split_width, 100);
        assert_eq!(config.inner_rect_percent, 0.5);
        assert_eq!(config.ssim_threshold, 0.8);
        assert_eq!(config.metric, MetricKind::Rms);
    }

    #[test]
    fn default_path_is_current_directory() {
        assert_eq!(WorkflowConfig::default().path, PathBuf::from("."));
    }

    #[test]
    fn start_filename_maps_to_each_half() {
        let config = WorkflowConfig {
            start_filename: Some("scan05.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.detector_config(Side::Left).start_filename.as_deref(),
            Some("scan05-L.jpg")
        );
        assert_eq!(
            config.detector_config(Side::Right).start_filename.as_deref(),
            Some("scan05-R.jpg")
        );
    }

    #[test]
    fn identical_left_pages_are_marked_on_the_left_only() {
        let temp_dir = TempDir::new().unwrap();
        create_spread(temp_dir.path(), "p1.png", 1);
        create_spread(temp_dir.path(), "p2.png", 2);

        let result = workflow(temp_dir.path()).run().unwrap();

        assert_eq!(result.split.files_split.len(), 2);
        assert_eq!(result.left.marked.len(), 1);
        assert!(result.right.marked.is_empty());
        let left = temp_dir.path().join(LEFT_SPLITS_DIR);
        assert!(left.join("p1-L.png").exists());
        assert!(left.join("p2-L-DUP.png").exists());
        let right = temp_dir.path().join(RIGHT_SPLITS_DIR);
        assert!(right.join("p1-R.png").exists());
        assert!(right.join("p2-R.png").exists());
    }

    #[test]
    fn nothing_split_means_empty_detection() {
        let temp_dir = TempDir::new().unwrap();
        // Narrower than the split column
        let img: GrayImage = ImageBuffer::from_pixel(10, 10, Luma([0]));
        img.save(temp_dir.path().join("small.png")).unwrap();

        let result = workflow(temp_dir.path()).run().unwrap();

        assert!(result.split.files_split.is_empty());
        assert_eq!(result.split.skipped.len(), 1);
        assert_eq!(result.left.files_examined, 0);
        assert_eq!(result.right.files_examined, 0);
        assert!(temp_dir.path().join("small.png").exists());
    }

    #[test]
    fn invalid_config_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        create_spread(temp_dir.path(), "p1.png", 1);

        let result = Workflow::builder()
            .path(temp_dir.path())
            .split_width(20)
            .ssim_threshold(1.5)
            .build()
            .run();

        assert!(matches!(result, Err(SplitDedupError::Config(_))));
        assert!(temp_dir.path().join("p1.png").exists());
        assert!(!temp_dir.path().join(LEFT_SPLITS_DIR).exists());
    }

    #[test]
    fn stages_are_announced_in_order() {
        let temp_dir = TempDir::new().unwrap();
        create_spread(temp_dir.path(), "p1.png", 1);
        let (sender, receiver) = EventChannel::new();

        workflow(temp_dir.path()).run_with_events(&sender).unwrap();
        drop(sender);

        let stages: Vec<_> = receiver
            .iter()
            .filter_map(|event| match event {
                Event::Workflow(WorkflowEvent::StageChanged { stage }) => Some(stage),
                _ => None,
            })
            .collect();
        assert_eq!(
            stages,
            vec![
                WorkflowStage::Splitting,
                WorkflowStage::DetectingLeft,
                WorkflowStage::DetectingRight
            ]
        );
    }
}
