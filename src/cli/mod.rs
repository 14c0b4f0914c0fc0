//! # CLI Module
//!
//! Command-line interface for the splitter and duplicate detector.
//!
//! ## Usage
//! ```bash
//! # Split every image at column 1920, then mark duplicates on both sides
//! split-dedup process --path ~/Scans
//!
//! # Resume from a given file
//! split-dedup process --path ~/Scans --start-filename scan0042.jpg
//!
//! # Only split
//! split-dedup split --path ~/Scans --split-width 1536
//!
//! # Only mark duplicates in one folder
//! split-dedup dedup --path ~/Scans/_left_splits --ssim-threshold 0.9
//!
//! # JSON output
//! split-dedup --output json process --path ~/Scans
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use split_dedup::core::detector::{
    DetectReport, DetectorConfig, DuplicateDetector, DEFAULT_INNER_RECT_PERCENT,
    DEFAULT_SSIM_THRESHOLD,
};
use split_dedup::core::similarity::MetricKind;
use split_dedup::core::splitter::{SplitConfig, SplitReport, Splitter, DEFAULT_SPLIT_WIDTH};
use split_dedup::core::workflow::{Workflow, WorkflowResult};
use split_dedup::core::SkippedFile;
use split_dedup::events::{DetectEvent, Event, EventChannel, EventSender, SplitEvent, WorkflowEvent};
use split_dedup::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::thread;

/// Split Dedup - Split wide scans and mark near-duplicate halves
#[derive(Parser, Debug)]
#[command(name = "split-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose output (log every comparison)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split every image, then mark duplicates in both halves
    Process {
        /// Directory to process
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Skip files sorting before this name
        #[arg(short, long)]
        start_filename: Option<String>,

        /// Pixel column where the right half starts
        #[arg(long, default_value_t = DEFAULT_SPLIT_WIDTH)]
        split_width: u32,

        #[command(flatten)]
        detect: DetectArgs,
    },
    /// Split every image into _left_splits and _right_splits
    Split {
        /// Directory to split
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Skip files sorting before this name
        #[arg(short, long)]
        filename: Option<String>,

        /// Pixel column where the right half starts
        #[arg(long, default_value_t = DEFAULT_SPLIT_WIDTH)]
        split_width: u32,
    },
    /// Mark near-duplicates in one directory
    Dedup {
        /// Directory to examine
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Skip files sorting before this name
        #[arg(short, long)]
        filename: Option<String>,

        #[command(flatten)]
        detect: DetectArgs,
    },
}

#[derive(Args, Debug)]
struct DetectArgs {
    /// Centred fraction of each image compared, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_INNER_RECT_PERCENT)]
    inner_rect_percent: f64,

    /// Similarity at or above which two images are duplicates, in [0, 1]
    #[arg(long, default_value_t = DEFAULT_SSIM_THRESHOLD)]
    ssim_threshold: f64,

    /// Similarity metric
    #[arg(long, default_value = "ssim")]
    metric: Metric,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Metric {
    /// Structural similarity (default)
    Ssim,
    /// Root-mean-squared pixel difference
    Rms,
}

impl From<Metric> for MetricKind {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::Ssim => MetricKind::Ssim,
            Metric::Rms => MetricKind::Rms,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    split_dedup::init_tracing(cli.verbose);

    match cli.command {
        Commands::Process {
            path,
            start_filename,
            split_width,
            detect,
        } => {
            let workflow = Workflow::builder()
                .path(path)
                .start_filename(start_filename)
                .split_width(split_width)
                .inner_rect_percent(detect.inner_rect_percent)
                .ssim_threshold(detect.ssim_threshold)
                .metric(detect.metric.into())
                .build();
            let result = with_progress(cli.output, |events| workflow.run_with_events(events))?;
            match cli.output {
                OutputFormat::Pretty => print_workflow(&Term::stderr(), &result),
                OutputFormat::Json => print_json(&result),
            }
        }
        Commands::Split {
            path,
            filename,
            split_width,
        } => {
            let splitter = Splitter::new(SplitConfig {
                split_width,
                start_filename: filename,
                ..Default::default()
            });
            let report = with_progress(cli.output, |events| splitter.run_with_events(&path, events))?;
            match cli.output {
                OutputFormat::Pretty => print_split(&Term::stderr(), &report),
                OutputFormat::Json => print_json(&report),
            }
        }
        Commands::Dedup {
            path,
            filename,
            detect,
        } => {
            let detector = DuplicateDetector::new(DetectorConfig {
                inner_rect_percent: detect.inner_rect_percent,
                ssim_threshold: detect.ssim_threshold,
                start_filename: filename,
                metric: detect.metric.into(),
                ..Default::default()
            });
            let report = with_progress(cli.output, |events| detector.run_with_events(&path, events))?;
            match cli.output {
                OutputFormat::Pretty => print_detect(&Term::stderr(), "Duplicates", &report),
                OutputFormat::Json => print_json(&report),
            }
        }
    }

    Ok(())
}

/// Run `job` while a background thread turns its events into a progress bar
fn with_progress<T>(
    output: OutputFormat,
    job: impl FnOnce(&EventSender) -> Result<T>,
) -> Result<T> {
    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        let Some(pb) = progress_clone else {
            // Drain so senders never notice a missing consumer
            for _ in receiver.iter() {}
            return;
        };

        for event in receiver.iter() {
            match event {
                Event::Workflow(WorkflowEvent::StageChanged { stage }) => {
                    pb.set_message(stage.to_string());
                }
                Event::Split(SplitEvent::Started { total_files, .. })
                | Event::Detect(DetectEvent::Started { total_files, .. }) => {
                    pb.set_length(total_files as u64);
                    pb.set_position(0);
                }
                Event::Split(SplitEvent::Progress(p)) | Event::Detect(DetectEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                }
                Event::Split(SplitEvent::Skipped { path, message })
                | Event::Detect(DetectEvent::Skipped { path, message }) => {
                    pb.println(format!(
                        "{} {}: {}",
                        style("!").yellow().bold(),
                        file_name(&path),
                        style(message).dim()
                    ));
                }
                _ => {}
            }
        }
        pb.finish_and_clear();
    });

    let result = job(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    result
}

fn print_workflow(term: &Term, result: &WorkflowResult) {
    let summary = result.summary();

    term.write_line("").ok();
    term.write_line(&format!("{} Processing Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();
    term.write_line(&format!(
        "  {} files split, {} duplicates marked, {} skipped in {:.1}s",
        style(summary.files_split).cyan(),
        style(summary.duplicates_marked).cyan(),
        style(summary.files_skipped).yellow(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();

    print_split(term, &result.split);
    print_detect(term, "Left halves", &result.left);
    print_detect(term, "Right halves", &result.right);
}

fn print_split(term: &Term, report: &SplitReport) {
    term.write_line("").ok();
    term.write_line(&format!(
        "{} {}",
        style("Split:").bold().underlined(),
        style(report.folder.display()).dim()
    ))
    .ok();
    term.write_line(&format!(
        "  {} files split",
        style(report.files_split.len()).cyan()
    ))
    .ok();
    print_skipped(term, &report.skipped);
}

fn print_detect(term: &Term, title: &str, report: &DetectReport) {
    term.write_line("").ok();
    term.write_line(&format!(
        "{} {}",
        style(format!("{}:", title)).bold().underlined(),
        style(report.folder.display()).dim()
    ))
    .ok();
    term.write_line(&format!(
        "  {} files examined, {} comparisons",
        style(report.files_examined).cyan(),
        style(report.comparisons.len()).cyan()
    ))
    .ok();

    if report.marked.is_empty() {
        term.write_line(&format!("  {} No new duplicates", style("○").dim()))
            .ok();
    }
    for marked in &report.marked {
        term.write_line(&format!(
            "  {} {} -> {} {}",
            style("★").yellow(),
            file_name(&marked.original),
            style(file_name(&marked.renamed)).yellow(),
            style(format!("(same as {})", file_name(&marked.reference))).dim()
        ))
        .ok();
    }
    if !report.already_marked.is_empty() {
        term.write_line(&format!(
            "  {} already marked, left as they are",
            style(report.already_marked.len()).dim()
        ))
        .ok();
    }
    print_skipped(term, &report.skipped);
}

fn print_skipped(term: &Term, skipped: &[SkippedFile]) {
    for file in skipped {
        term.write_line(&format!(
            "  {} {}: {}",
            style("!").yellow().bold(),
            file_name(&file.path),
            style(&file.message).dim()
        ))
        .ok();
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "failed to serialize results"),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
