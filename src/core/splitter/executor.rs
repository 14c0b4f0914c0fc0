//! Splits images into left/right halves, deleting each source only after
//! both halves are safely on disk.

use super::types::*;
use crate::core::imaging::{self, Decoder};
use crate::core::naming::{self, Side};
use crate::core::scanner::{self, DirectoryScanner, ImageFile, ScanConfig};
use crate::core::SkippedFile;
use crate::error::{CodecError, GeometryError, SplitDedupError, SplitError};
use crate::events::{null_sender, Event, EventSender, FileProgress, SplitEvent};
use image::{DynamicImage, GenericImageView};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Splits every image of a directory at a fixed column
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    /// Create a splitter
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Split `dir` without events
    pub fn run(&self, dir: &Path) -> Result<SplitReport, SplitDedupError> {
        self.run_with_events(dir, &null_sender())
    }

    /// Split every supported image in `dir`, in filename order.
    ///
    /// Only configuration problems are returned as errors. A file that
    /// cannot be split is logged, reported in [`SplitReport::skipped`] and
    /// left where it is.
    pub fn run_with_events(
        &self,
        dir: &Path,
        events: &EventSender,
    ) -> Result<SplitReport, SplitDedupError> {
        let start_time = Instant::now();
        self.config.validate()?;
        scanner::require_directory(dir)?;

        let scanner = DirectoryScanner::new(ScanConfig {
            include_hidden: self.config.include_hidden,
            skip_marked: true,
        });
        let files = scanner.scan(dir, self.config.start_filename.as_deref())?;
        let total = files.len();

        tracing::info!(folder = %dir.display(), files = total, split_width = self.config.split_width, "splitting");
        events.send(Event::Split(SplitEvent::Started {
            folder: dir.to_path_buf(),
            total_files: total,
        }));

        let mut files_split = Vec::new();
        let mut skipped = Vec::new();

        for (i, file) in files.iter().enumerate() {
            events.send(Event::Split(SplitEvent::Progress(FileProgress {
                completed: i + 1,
                total,
                current_path: file.path.clone(),
            })));

            match self.split_file(dir, file) {
                Ok(output) => {
                    tracing::info!(source = %file.file_name, "split and removed source");
                    events.send(Event::Split(SplitEvent::FileSplit {
                        source: output.source.clone(),
                        left: output.left.clone(),
                        right: output.right.clone(),
                    }));
                    files_split.push(output);
                }
                Err(e) => {
                    tracing::warn!(file = %file.path.display(), error = %e, "skipping split");
                    events.send(Event::Split(SplitEvent::Skipped {
                        path: file.path.clone(),
                        message: e.to_string(),
                    }));
                    skipped.push(SkippedFile {
                        path: file.path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        events.send(Event::Split(SplitEvent::Completed {
            files_split: files_split.len(),
            skipped: skipped.len(),
        }));

        Ok(SplitReport {
            folder: dir.to_path_buf(),
            files_split,
            skipped,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Split one file of `dir` into `_left_splits` and `_right_splits`.
    ///
    /// Order of effects: load, check geometry, check both destinations are
    /// free, write left, write right, verify both, delete source. Any failure
    /// before the delete leaves the source in place and removes whatever
    /// half was already written.
    pub fn split_file(&self, dir: &Path, file: &ImageFile) -> Result<SplitOutput, SplitError> {
        let image = Decoder::load(&file.path)?;
        let (width, height) = image.dimensions();
        let split_width = self.config.split_width;

        if split_width >= width {
            return Err(GeometryError::SplitOutOfBounds {
                split_width,
                image_width: width,
            }
            .into());
        }

        let left_path = output_path(dir, &file.file_name, Side::Left);
        let right_path = output_path(dir, &file.file_name, Side::Right);

        for path in [&left_path, &right_path] {
            if path.exists() {
                return Err(SplitError::WriteConflict { path: path.clone() });
            }
        }

        for side in [Side::Left, Side::Right] {
            let sub_dir = dir.join(side.dir_name());
            fs::create_dir_all(&sub_dir).map_err(|source| SplitError::Io {
                path: sub_dir,
                source,
            })?;
        }

        let left = image.crop_imm(0, 0, split_width, height);
        let right = image.crop_imm(split_width, 0, width - split_width, height);

        write_half(&left, &left_path)?;
        if let Err(e) = write_half(&right, &right_path) {
            remove_output(&left_path);
            return Err(e);
        }

        if let Err(e) = verify(&left_path).and_then(|()| verify(&right_path)) {
            remove_output(&left_path);
            remove_output(&right_path);
            return Err(e);
        }

        fs::remove_file(&file.path).map_err(|source| SplitError::Io {
            path: file.path.clone(),
            source,
        })?;

        Ok(SplitOutput {
            source: file.path.clone(),
            left: left_path,
            right: right_path,
            width,
            height,
        })
    }
}

fn output_path(dir: &Path, file_name: &str, side: Side) -> PathBuf {
    dir.join(side.dir_name())
        .join(naming::split_name(file_name, side))
}

fn write_half(image: &DynamicImage, path: &Path) -> Result<(), SplitError> {
    imaging::save_new(image, path).map_err(|e| match e {
        CodecError::Io { path, source } if source.kind() == ErrorKind::AlreadyExists => {
            SplitError::WriteConflict { path }
        }
        other => other.into(),
    })
}

/// Remove a half written for a split that is being abandoned
fn remove_output(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed abandoned split output"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "could not remove abandoned split output; a rerun will see it as a conflict"
        ),
    }
}

fn verify(path: &Path) -> Result<(), SplitError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() && metadata.len() > 0 => Ok(()),
        _ => Err(SplitError::Verify {
            path: path.to_path_buf(),
        }),
    }
}
