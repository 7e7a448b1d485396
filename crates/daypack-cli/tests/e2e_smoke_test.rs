use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::tempdir;

use daypack::DaypackError;
use daypack_cli::{Args, run};

fn demos_dir() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all day files (.toml and .json) from a directory
fn collect_day_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file()
                        && matches!(
                            path.extension().and_then(|s| s.to_str()),
                            Some("toml" | "json")
                        )
                })
                .collect()
        })
        .unwrap_or_default();

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        width: None,
        first_hour: None,
        log_level: "off".to_string(),
    }
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("Output file should exist");
    serde_json::from_str(&text).expect("Output should be valid JSON")
}

#[test]
fn e2e_smoke_test_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_day_files(&demos_dir());

    assert!(!demos.is_empty(), "No day files found in demos/");

    let mut failed = Vec::new();

    for demo in &demos {
        let output_path = temp_dir
            .path()
            .join(format!("{}.json", demo.file_stem().unwrap().to_string_lossy()));

        match run(&args(demo, &output_path)) {
            Ok(()) => {
                let json = read_json(&output_path);
                assert!(json["events"].is_array(), "{}", demo.display());
            }
            Err(e) => failed.push((demo.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_workday_layout() {
    let temp_dir = tempdir().unwrap();
    let output_path = temp_dir.path().join("workday.json");

    run(&args(&demos_dir().join("workday.toml"), &output_path)).unwrap();

    let json = read_json(&output_path);
    let events = json["events"].as_array().unwrap();
    let order: Vec<u64> = events.iter().map(|e| e["index"].as_u64().unwrap()).collect();

    assert_eq!(order, vec![0, 2, 3, 1, 4, 5, 6]);

    // The vendor call overlaps both the design review and the planning block
    let vendor = &events[4];
    assert_eq!(vendor["title"], "Vendor call");
    assert_eq!(vendor["column"], 2);
    assert_eq!(vendor["columns"], 3);

    // Lunch has no end and gets the default hour
    let lunch = &events[5];
    assert_eq!(lunch["end"], "2024-05-06T14:00:00");
    assert_eq!(lunch["top"], 1300.0);
    assert_eq!(lunch["height"], 100.0);

    // Inbox at 08:30 puts the initial scroll one hour above it
    assert_eq!(json["initial_scroll"], 750.0);
    assert_eq!(events[6]["attendees"][1], "Ravi");
}

#[test]
fn e2e_config_and_overrides() {
    let temp_dir = tempdir().unwrap();
    let output_path = temp_dir.path().join("clinic.json");

    let mut args = args(&demos_dir().join("clinic.json"), &output_path);
    args.config = Some(
        demos_dir()
            .join("config")
            .join("daypack.toml")
            .to_string_lossy()
            .to_string(),
    );
    args.width = Some(359.0);

    run(&args).unwrap();

    let json = read_json(&output_path);

    // 07:00 to 22:00 at 80 pixels an hour
    assert_eq!(json["height"], 1200.0);

    let first = &json["events"][0];
    assert_eq!(first["top"], 80.0);
    assert_eq!(first["screen_left"], 59.0);

    // The walk-in gets the configured 30 minute default
    let walk_in = &json["events"][4];
    assert_eq!(walk_in["end"], "2024-05-07T11:30:00");
    assert_eq!(walk_in["height"], 40.0);
}

#[test]
fn e2e_degenerate_event_is_rejected_by_default() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("bad.toml");
    let output_path = temp_dir.path().join("bad.json");
    fs::write(
        &input_path,
        "[[events]]\nstart = \"2024-05-06T10:00:00\"\nend = \"2024-05-06T09:00:00\"\n",
    )
    .unwrap();

    let result = run(&args(&input_path, &output_path));

    assert!(matches!(
        result,
        Err(DaypackError::InvalidEvent { index: 0, .. })
    ));
    assert!(!output_path.exists());
}

#[test]
fn e2e_malformed_input_is_a_parse_error() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("broken.json");
    let output_path = temp_dir.path().join("broken.out.json");
    fs::write(&input_path, "{\"events\": [{\"start\": 9}]}").unwrap();

    let result = run(&args(&input_path, &output_path));

    assert!(matches!(result, Err(DaypackError::Parse { .. })));
}

#[test]
fn e2e_missing_input_is_an_io_error() {
    let temp_dir = tempdir().unwrap();

    let result = run(&args(
        &temp_dir.path().join("absent.toml"),
        &temp_dir.path().join("out.json"),
    ));

    assert!(matches!(result, Err(DaypackError::Io(_))));
}
