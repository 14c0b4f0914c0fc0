//! Integration tests for the duplicate detector on its own.

use assert_fs::prelude::*;
use assert_fs::TempDir;
use image::{GrayImage, ImageBuffer, Luma};
use predicates::prelude::*;
use split_dedup::core::detector::{DetectorConfig, DuplicateDetector};
use split_dedup::core::similarity::{MetricKind, Verdict};
use std::path::Path;

fn noise(x: u32, y: u32, seed: u32) -> u8 {
    let mut h = x.wrapping_mul(0x9E37_79B1)
        ^ y.wrapping_mul(0x85EB_CA77)
        ^ seed.wrapping_mul(0xC2B2_AE3D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    (h >> 24) as u8
}

fn write_noise(path: &Path, seed: u32) {
    let img: GrayImage = ImageBuffer::from_fn(48, 48, |x, y| Luma([noise(x, y, seed)]));
    img.save(path).unwrap();
}

/// Same picture as `write_noise(seed)` with a bright border
fn write_framed(path: &Path, seed: u32) {
    let img: GrayImage = ImageBuffer::from_fn(48, 48, |x, y| {
        if x < 2 || y < 2 || x >= 46 || y >= 46 {
            Luma([255])
        } else {
            Luma([noise(x, y, seed)])
        }
    });
    img.save(path).unwrap();
}

#[test]
fn detector_ignores_borders_outside_the_inner_window() {
    let temp = TempDir::new().unwrap();
    write_noise(temp.child("a.png").path(), 7);
    write_framed(temp.child("b.png").path(), 7);

    let report = DuplicateDetector::new(DetectorConfig::default())
        .run(temp.path())
        .unwrap();

    assert_eq!(report.comparisons.len(), 1);
    assert_eq!(report.comparisons[0].verdict, Verdict::Same);
    temp.child("b-DUP.png").assert(predicate::path::is_file());
}

#[test]
fn detector_full_window_sees_the_border() {
    let temp = TempDir::new().unwrap();
    write_noise(temp.child("a.png").path(), 7);
    write_framed(temp.child("b.png").path(), 7);
    let config = DetectorConfig {
        inner_rect_percent: 1.0,
        ssim_threshold: 0.99,
        ..Default::default()
    };

    let report = DuplicateDetector::new(config).run(temp.path()).unwrap();

    assert_eq!(report.comparisons[0].verdict, Verdict::Different);
    temp.child("b.png").assert(predicate::path::is_file());
}

#[test]
fn detector_keeps_unrelated_images() {
    let temp = TempDir::new().unwrap();
    for (i, name) in ["a.png", "b.png", "c.png"].iter().enumerate() {
        write_noise(temp.child(name).path(), i as u32 + 1);
    }

    let report = DuplicateDetector::new(DetectorConfig::default())
        .run(temp.path())
        .unwrap();

    assert!(report.marked.is_empty());
    assert_eq!(report.comparisons.len(), 2);
    assert!(report.comparisons.iter().all(|c| c.score < 0.5));
}

#[test]
fn detector_with_rms_metric_marks_exact_copies() {
    let temp = TempDir::new().unwrap();
    write_noise(temp.child("a.png").path(), 3);
    write_noise(temp.child("b.png").path(), 3);
    let config = DetectorConfig {
        metric: MetricKind::Rms,
        ..Default::default()
    };

    let report = DuplicateDetector::new(config).run(temp.path()).unwrap();

    assert!(report.comparisons[0].score > 0.999);
    temp.child("b-DUP.png").assert(predicate::path::is_file());
}

#[test]
fn detector_leaves_non_images_alone() {
    let temp = TempDir::new().unwrap();
    write_noise(temp.child("a.png").path(), 3);
    temp.child("notes.txt").write_str("not an image").unwrap();
    write_noise(temp.child("b.png").path(), 3);

    let report = DuplicateDetector::new(DetectorConfig::default())
        .run(temp.path())
        .unwrap();

    assert_eq!(report.files_examined, 2);
    assert!(report.skipped.is_empty());
    temp.child("notes.txt").assert(predicate::path::is_file());
}
