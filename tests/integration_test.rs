use std::fs;
use std::path::Path;
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_print-sheet"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

fn layout_json(args: &[&str]) -> serde_json::Value {
    let output = cargo_bin()
        .args(args)
        .arg("--json")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "Command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}

#[test]
fn test_basic_sheet() {
    setup();
    let output_file = "test-basic-sheet.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-j", "tests/fixtures/stickers.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Grid: 3 x 3"), "unexpected summary: {}", stdout);
}

#[test]
fn test_a4_no_labels_custom_title() {
    setup();
    let output_file = "test-a4-no-labels.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-j", "tests/fixtures/stickers.json",
            "-p", "a4",
            "--no-labels",
            "-t", "Proof Copy",
            "-d", "2025-12-25",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");
}

#[test]
fn test_overflow_sheet_still_renders() {
    setup();
    let output_file = "test-overflow.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-j", "tests/fixtures/overflow.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dropped: 2"), "unexpected summary: {}", stdout);
}

#[test]
fn test_json_layout() {
    let layout = layout_json(&["-j", "tests/fixtures/stickers.json"]);

    assert_eq!(layout["grid"]["cols"], 3);
    assert_eq!(layout["grid"]["rows"], 3);
    assert_eq!(layout["totalCells"], 8);
    assert_eq!(layout["droppedCells"], 2);

    let placements = layout["placements"].as_array().expect("placements array");
    assert_eq!(placements.len(), 6);
    assert_eq!(placements[0]["itemId"], "logo.png");
    assert_eq!(placements[0]["spanCols"], 2);
    assert_eq!(placements[0]["fitMode"], "cover");
    assert_eq!(placements[1]["col"], 2);
}

#[test]
fn test_json_degraded_span() {
    let layout = layout_json(&["-j", "tests/fixtures/overflow.json"]);

    let placements = layout["placements"].as_array().expect("placements array");
    assert_eq!(placements.len(), 4);
    assert_eq!(placements[0]["itemId"], "big.png");
    assert_eq!(placements[0]["degraded"], true);
    assert_eq!(placements[0]["spanCols"], 1);
    assert_eq!(layout["droppedCells"], 2);
}

#[test]
fn test_cli_overrides_win_over_job() {
    let layout = layout_json(&["-j", "tests/fixtures/overflow.json", "--cols", "4", "--rows", "4"]);

    assert_eq!(layout["grid"]["cols"], 4);
    assert_eq!(layout["grid"]["rows"], 4);
    assert_eq!(layout["droppedCells"], 0);

    let placements = layout["placements"].as_array().expect("placements array");
    assert_eq!(placements[0]["degraded"], false);
    assert_eq!(placements[0]["spanRows"], 3);
}

#[test]
fn test_empty_job() {
    let layout = layout_json(&["-j", "tests/fixtures/empty.json"]);

    assert_eq!(layout["grid"]["cols"], 1);
    assert_eq!(layout["grid"]["rows"], 1);
    assert_eq!(layout["placements"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_invalid_job_file() {
    let output = cargo_bin()
        .args([
            "-j", "nonexistent.json",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing job file");
}

#[test]
fn test_negative_repeat_count() {
    let output = cargo_bin()
        .args(["-j", "tests/fixtures/invalid-repeat.json", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for negative repeat count");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid input"), "unexpected error: {}", stderr);
}

#[test]
fn test_zero_column_override() {
    let output = cargo_bin()
        .args(["-j", "tests/fixtures/stickers.json", "--cols", "0", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for zero columns");
}

#[test]
fn test_invalid_date_format() {
    let output = cargo_bin()
        .args([
            "-j", "tests/fixtures/stickers.json",
            "-d", "not-a-date",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for invalid date");
}

#[test]
fn test_huge_grid_override_rejected() {
    let output = cargo_bin()
        .args([
            "-j", "tests/fixtures/stickers.json",
            "--cols", "4294967295",
            "--rows", "4294967295",
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for an oversized grid");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("slot limit"), "unexpected error: {}", stderr);
}

#[test]
fn test_huge_repeat_count_fills_small_grid() {
    let layout = layout_json(&["-j", "tests/fixtures/flood.json"]);

    assert_eq!(layout["placements"].as_array().map(Vec::len), Some(4));
    assert_eq!(layout["totalCells"], 4_000_000_000u64);
    assert_eq!(layout["droppedCells"], 3_999_999_996u64);
}

#[test]
fn test_artwork_sizes_render() {
    setup();
    let output_file = "test-artwork.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-j", "tests/fixtures/artwork.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Placed: 5 of 5"), "unexpected summary: {}", stdout);
}
