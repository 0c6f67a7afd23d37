//! CLI integration tests
//!
//! Runs the `uniform-border` binary against generated image trees.

use assert_cmd::Command;
use image::{GrayImage, Luma, Rgb, RgbImage};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn framed_gray(size: u32, border: u32) -> GrayImage {
    GrayImage::from_fn(size, size, |x, y| {
        let inside = x >= border && y >= border && x < size - border && y < size - border;
        Luma([if inside { 180 } else { 0 }])
    })
}

fn mismatched_rgb(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    img.put_pixel(width - 1, height - 1, Rgb([255, 255, 255]));
    img
}

fn bin(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("uniform-border").unwrap();
    cmd.current_dir(cwd);
    cmd
}

fn dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).unwrap();
    (img.width(), img.height())
}

// TC-CLI-001: missing input directory
#[test]
fn test_missing_directory_exits_before_logging() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("run.log");

    bin(dir.path())
        .args(["normalize", "does-not-exist", "-l"])
        .arg(&log)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!log.exists());
}

#[test]
fn test_file_instead_of_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("single.png");
    framed_gray(20, 2).save(&file).unwrap();

    bin(dir.path())
        .arg("normalize")
        .arg(&file)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not a directory"));
}

// TC-CLI-002: dry-run reports and leaves files alone
#[test]
fn test_dry_run_reports_plan() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();
    let framed = input.join("framed.png");
    framed_gray(100, 10).save(&framed).unwrap();
    let before = fs::read(&framed).unwrap();
    let log = dir.path().join("run.log");

    bin(dir.path())
        .arg("normalize")
        .arg(&input)
        .args(["--dry-run", "-p", "5", "-l"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: DRY-RUN"))
        .stdout(predicate::str::contains("Original size: 100x100"))
        .stdout(predicate::str::contains("Border color: (0,)"))
        .stdout(predicate::str::contains("Border widths - L:10 R:10 T:10 B:10"))
        .stdout(predicate::str::contains("New size: 90x90"))
        .stdout(predicate::str::contains(
            "Action: DRY-RUN - Would crop to (10, 10, 90, 90) and pad 5px",
        ));

    assert_eq!(fs::read(&framed).unwrap(), before);
    let log_text = fs::read_to_string(&log).unwrap();
    assert!(log_text.contains("Border widths - L:10 R:10 T:10 B:10"));
    assert!(log_text.contains("Processing complete!"));
}

// TC-CLI-003: live run into an output directory
#[test]
fn test_live_run_with_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    let output = dir.path().join("normalized");
    fs::create_dir_all(input.join("nested")).unwrap();
    framed_gray(60, 12).save(input.join("a.png")).unwrap();
    mismatched_rgb(30, 20)
        .save(input.join("nested/b.PNG"))
        .unwrap();

    bin(dir.path())
        .arg("normalize")
        .arg(&input)
        .args(["-p", "4", "-o"])
        .arg(&output)
        .arg("-l")
        .arg(dir.path().join("run.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 image(s)"))
        .stdout(predicate::str::contains("UNIFORM BORDERS APPLIED"))
        .stdout(predicate::str::contains("UNIFORM BORDER ADDED"))
        .stdout(predicate::str::contains("Border color: no uniform border"));

    assert_eq!(dimensions(&output.join("a.png")), (44, 44));
    assert_eq!(dimensions(&output.join("nested/b.PNG")), (38, 28));
    assert_eq!(dimensions(&input.join("a.png")), (60, 60));
}

#[test]
fn test_in_place_run_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();
    let path = input.join("framed.png");
    framed_gray(50, 9).save(&path).unwrap();
    let log = dir.path().join("run.log");

    for _ in 0..2 {
        bin(dir.path())
            .arg("normalize")
            .arg(&input)
            .args(["-p", "3", "-l"])
            .arg(&log)
            .assert()
            .success();
        assert_eq!(dimensions(&path), (38, 38));
    }

    let pixels = image::open(&path).unwrap().to_luma8();
    assert_eq!(pixels.get_pixel(2, 2), &Luma([0]));
    assert_eq!(pixels.get_pixel(3, 3), &Luma([180]));
}

// TC-CLI-004: a broken file is reported, the rest is processed
#[test]
fn test_broken_file_does_not_abort_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("a_broken.jpg"), b"definitely not a jpeg").unwrap();
    framed_gray(40, 5).save(input.join("b_good.png")).unwrap();

    bin(dir.path())
        .arg("normalize")
        .arg(&input)
        .args(["-p", "1", "-l"])
        .arg(dir.path().join("run.log"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error processing"))
        .stdout(predicate::str::contains("a_broken.jpg"))
        .stdout(predicate::str::contains("Failed:   1"))
        .stderr(predicate::str::contains("1 file(s) failed"));

    assert_eq!(dimensions(&input.join("b_good.png")), (32, 32));
}

#[test]
fn test_config_file_supplies_padding() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();
    framed_gray(40, 10).save(input.join("a.png")).unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "padding = 2\ndry_run = true\n").unwrap();

    bin(dir.path())
        .arg("normalize")
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .arg("-l")
        .arg(dir.path().join("run.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Padding: 2 pixels"))
        .stdout(predicate::str::contains("New size: 24x24"));

    assert_eq!(dimensions(&input.join("a.png")), (40, 40));
}

#[test]
fn test_no_dry_run_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();
    framed_gray(40, 10).save(input.join("a.png")).unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "padding = 2\ndry_run = true\n").unwrap();

    bin(dir.path())
        .arg("normalize")
        .arg(&input)
        .args(["--no-dry-run", "-c"])
        .arg(&config)
        .arg("-l")
        .arg(dir.path().join("run.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: LIVE"));

    assert_eq!(dimensions(&input.join("a.png")), (24, 24));
}

#[test]
fn test_png_named_jpg_is_processed() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scans");
    fs::create_dir_all(&input).unwrap();
    framed_gray(30, 5)
        .save_with_format(input.join("page.jpg"), image::ImageFormat::Png)
        .unwrap();

    bin(dir.path())
        .arg("normalize")
        .arg(&input)
        .args(["-p", "2", "-l"])
        .arg(dir.path().join("run.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed:   0"));

    assert_eq!(dimensions(&input.join("page.jpg")), (24, 24));
}

#[test]
fn test_huge_padding_fails_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("images");
    fs::create_dir_all(&input).unwrap();
    framed_gray(20, 4).save(input.join("a.png")).unwrap();

    bin(dir.path())
        .arg("normalize")
        .arg(&input)
        .args(["-p", "2147483648", "-l"])
        .arg(dir.path().join("run.log"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("pixel limit"))
        .stdout(predicate::str::contains("Failed:   1"));

    assert_eq!(dimensions(&input.join("a.png")), (20, 20));
}

#[test]
fn test_inspect_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("photo.png");
    mismatched_rgb(20, 10).save(&file).unwrap();

    bin(dir.path())
        .arg("inspect")
        .arg(&file)
        .args(["-p", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Border color: no uniform border"))
        .stdout(predicate::str::contains("New size: 30x20"))
        .stdout(predicate::str::contains("DRY-RUN - Would add 5px border of (255, 255, 255)"));

    assert_eq!(dimensions(&file), (20, 10));
}

#[test]
fn test_info_prints_version() {
    let dir = tempfile::tempdir().unwrap();
    bin(dir.path())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("uniform-border v"))
        .stdout(predicate::str::contains("padding = 5"));
}
