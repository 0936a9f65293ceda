//! End-to-end runs of the `batch-resizer` binary.

#![allow(deprecated)] // cargo_bin deprecation

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use tempfile::TempDir;

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([12, 34, 56]))
        .save(&path)
        .unwrap();
    path
}

fn resizer(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("batch-resizer").unwrap();
    // Keep every run away from the real user config.
    cmd.arg("--settings")
        .arg(temp.path().join("settings.ron"));
    cmd
}

#[test]
fn missing_paths_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    resizer(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PATHS"));
}

#[test]
fn percentage_run_reports_partial_success() {
    let temp = TempDir::new().unwrap();
    let good = vec![
        write_png(temp.path(), "a.png", 100, 200),
        write_png(temp.path(), "b.png", 60, 60),
        write_png(temp.path(), "c.png", 80, 40),
    ];
    let broken = temp.path().join("broken.png");
    fs::write(&broken, b"nope").unwrap();

    resizer(&temp)
        .args(["--scale-x", "50", "--scale-y", "50"])
        .args(&good)
        .arg(&broken)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "3 of 4 image files were successfully converted!",
        ))
        .stderr(predicate::str::contains("broken.png"));

    assert_eq!(image::image_dimensions(&good[0]).unwrap(), (50, 100));
    assert_eq!(image::image_dimensions(&good[1]).unwrap(), (30, 30));
    assert_eq!(image::image_dimensions(&good[2]).unwrap(), (40, 20));
}

#[test]
fn large_absolute_batch_converts_every_file() {
    let temp = TempDir::new().unwrap();
    let files: Vec<PathBuf> = (0..45)
        .map(|i| write_png(temp.path(), &format!("img_{i:02}.png"), 40, 30))
        .collect();

    resizer(&temp)
        .args(["--width", "20", "--height", "20", "--workers", "4"])
        .args(&files)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "45 of 45 image files were successfully converted!",
        ));

    for file in &files {
        assert_eq!(image::image_dimensions(file).unwrap(), (20, 15));
    }
}

#[test]
fn unsupported_files_only_is_an_error() {
    let temp = TempDir::new().unwrap();
    let text = temp.path().join("notes.txt");
    fs::write(&text, "hello").unwrap();

    resizer(&temp)
        .arg(&text)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no supported image files"));
}

#[test]
fn zero_scale_is_rejected_without_touching_files() {
    let temp = TempDir::new().unwrap();
    let file = write_png(temp.path(), "keep.png", 10, 10);
    let before = fs::read(&file).unwrap();

    resizer(&temp)
        .args(["--scale-x", "0"])
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("non-zero"));

    assert_eq!(fs::read(&file).unwrap(), before);
}

#[test]
fn saved_settings_apply_to_later_runs() {
    let temp = TempDir::new().unwrap();
    let first = write_png(temp.path(), "first.png", 400, 400);
    let second = write_png(temp.path(), "second.png", 400, 200);

    resizer(&temp)
        .args(["--width", "100", "--height", "100", "--save-settings"])
        .arg(&first)
        .assert()
        .success();
    assert!(temp.path().join("settings.ron").exists());

    resizer(&temp).arg(&second).assert().success();

    assert_eq!(image::image_dimensions(&first).unwrap(), (100, 100));
    assert_eq!(image::image_dimensions(&second).unwrap(), (100, 50));
}
