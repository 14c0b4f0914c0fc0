//! Sequential duplicate detection with chain propagation.

use super::marking;
use super::types::*;
use crate::core::imaging::{grayscale_window, Decoder, GrayResizer};
use crate::core::naming;
use crate::core::scanner::{self, DirectoryScanner, ScanConfig};
use crate::core::similarity::{SimilarityMetric, SimilarityThreshold, Verdict};
use crate::core::SkippedFile;
use crate::error::{DetectError, SplitDedupError};
use crate::events::{null_sender, DetectEvent, Event, EventSender, FileProgress};
use image::GrayImage;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The image every following candidate is compared against
struct Reference {
    path: PathBuf,
    window: GrayImage,
}

/// Marks near-duplicates in a directory by renaming them
///
/// Files are visited in filename order. The first readable file becomes
/// the reference; a candidate judged the same as the reference is marked
/// and the reference stays put, so a whole run of duplicates is measured
/// against one original. A candidate judged different becomes the new
/// reference.
pub struct DuplicateDetector {
    config: DetectorConfig,
    metric: Box<dyn SimilarityMetric>,
    threshold: SimilarityThreshold,
}

impl DuplicateDetector {
    /// Create a detector using the configured metric
    pub fn new(config: DetectorConfig) -> Self {
        let metric = config.metric.build();
        Self::with_metric(config, metric)
    }

    /// Create a detector with a custom metric
    pub fn with_metric(config: DetectorConfig, metric: Box<dyn SimilarityMetric>) -> Self {
        let threshold = SimilarityThreshold::new(config.ssim_threshold);
        Self {
            config,
            metric,
            threshold,
        }
    }

    /// Detect duplicates in `dir` without events
    pub fn run(&self, dir: &Path) -> Result<DetectReport, SplitDedupError> {
        self.run_with_events(dir, &null_sender())
    }

    /// Detect and mark duplicates in `dir`.
    ///
    /// Only configuration problems are returned as errors. An unreadable
    /// candidate is skipped and the previous reference kept; a failed rename
    /// is reported and the scan continues.
    pub fn run_with_events(
        &self,
        dir: &Path,
        events: &EventSender,
    ) -> Result<DetectReport, SplitDedupError> {
        let start_time = Instant::now();
        self.config.validate()?;
        scanner::require_directory(dir)?;

        let scanner = DirectoryScanner::new(ScanConfig {
            include_hidden: self.config.include_hidden,
            skip_marked: false,
        });
        let files = scanner.scan(dir, self.config.start_filename.as_deref())?;
        let total = files.len();

        tracing::info!(
            folder = %dir.display(),
            files = total,
            metric = self.metric.name(),
            threshold = self.threshold.value(),
            "detecting duplicates"
        );
        events.send(Event::Detect(DetectEvent::Started {
            folder: dir.to_path_buf(),
            total_files: total,
        }));

        let mut report = DetectReport::empty(dir.to_path_buf());
        report.files_examined = total;

        let mut resizer = GrayResizer::new();
        let mut reference: Option<Reference> = None;

        for (i, file) in files.iter().enumerate() {
            events.send(Event::Detect(DetectEvent::Progress(FileProgress {
                completed: i + 1,
                total,
                current_path: file.path.clone(),
            })));

            let window = match self.load_window(&file.path) {
                Ok(window) => window,
                Err(e) => {
                    skip(&mut report, events, &file.path, &e);
                    continue;
                }
            };

            let Some(current) = reference.as_ref() else {
                tracing::debug!(file = %file.file_name, "first reference");
                events.send(Event::Detect(DetectEvent::ReferenceChanged {
                    path: file.path.clone(),
                }));
                reference = Some(Reference {
                    path: file.path.clone(),
                    window,
                });
                continue;
            };

            let score = match self.score(&current.window, &window, &mut resizer) {
                Ok(score) => score,
                Err(e) => {
                    skip(&mut report, events, &file.path, &e);
                    continue;
                }
            };
            let reference_path = current.path.clone();
            let verdict = self.threshold.judge(score);

            tracing::debug!(
                reference = %reference_path.display(),
                candidate = %file.file_name,
                score,
                ?verdict,
                "compared"
            );
            events.send(Event::Detect(DetectEvent::Compared {
                reference: reference_path.clone(),
                candidate: file.path.clone(),
                score,
            }));
            report.comparisons.push(Comparison {
                reference: reference_path.clone(),
                candidate: file.path.clone(),
                score,
                verdict,
            });

            match verdict {
                Verdict::Same if naming::is_marked(&file.path) => {
                    tracing::debug!(file = %file.file_name, "already marked");
                    report.already_marked.push(file.path.clone());
                }
                Verdict::Same => match marking::mark_duplicate(&file.path) {
                    Ok(renamed) => {
                        tracing::info!(
                            original = %file.file_name,
                            renamed = %renamed.display(),
                            reference = %reference_path.display(),
                            "marked duplicate"
                        );
                        events.send(Event::Detect(DetectEvent::DuplicateMarked {
                            original: file.path.clone(),
                            renamed: renamed.clone(),
                            reference: reference_path.clone(),
                        }));
                        report.marked.push(MarkedDuplicate {
                            original: file.path.clone(),
                            renamed,
                            reference: reference_path,
                        });
                    }
                    Err(e) => skip(&mut report, events, &file.path, &e),
                },
                Verdict::Different => {
                    events.send(Event::Detect(DetectEvent::ReferenceChanged {
                        path: file.path.clone(),
                    }));
                    reference = Some(Reference {
                        path: file.path.clone(),
                        window,
                    });
                }
            }
        }

        events.send(Event::Detect(DetectEvent::Completed {
            folder: dir.to_path_buf(),
            duplicates_marked: report.marked.len(),
        }));

        report.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(report)
    }

    fn load_window(&self, path: &Path) -> Result<GrayImage, DetectError> {
        let image = Decoder::load(path)?;
        Ok(grayscale_window(&image, self.config.inner_rect_percent)?)
    }

    /// Score `candidate` against `reference`, resizing the candidate first
    /// when the windows differ in size.
    fn score(
        &self,
        reference: &GrayImage,
        candidate: &GrayImage,
        resizer: &mut GrayResizer,
    ) -> Result<f64, DetectError> {
        let (width, height) = reference.dimensions();
        if candidate.dimensions() == (width, height) {
            return self.metric.score(reference, candidate);
        }

        let resized = resizer.resize(candidate, width, height)?;
        self.metric.score(reference, &resized)
    }
}

fn skip(report: &mut DetectReport, events: &EventSender, path: &Path, error: &DetectError) {
    tracing::warn!(file = %path.display(), error = %error, "skipping file");
    events.send(Event::Detect(DetectEvent::Skipped {
        path: path.to_path_buf(),
        message: error.to_string(),
    }));
    report.skipped.push(SkippedFile {
        path: path.to_path_buf(),
        message: error.to_string(),
    });
}
