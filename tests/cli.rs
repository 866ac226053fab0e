//! Command-line behaviour of the wpreport binary

mod common;

use serde_json::json;
use std::process::Command;

fn wpreport() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wpreport"))
}

#[test]
fn test_report_without_directory_exits_with_one() {
    let output = wpreport().arg("report").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
}

#[test]
fn test_help_exits_with_zero() {
    let output = wpreport().arg("--help").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_report_writes_file() {
    let dir = common::snapshot_dir(&[
        ("categories.json", json!([{"id": 1, "name": "News"}])),
        (
            "posts.json",
            json!([{"title": {"rendered": "Hello"}, "categories": [1], "author": 5}]),
        ),
        ("users.json", json!([{"id": 5, "name": "Bob"}])),
    ]);

    let output = wpreport().arg("report").arg(dir.path()).output().unwrap();
    assert!(output.status.success(), "{output:?}");

    let text = common::read_report(dir.path());
    assert!(text.contains("  - News: 1"));
    assert!(text.contains("👤 Bob [1 posts]"));
}

#[test]
fn test_malformed_snapshot_fails() {
    let dir = common::snapshot_dir(&[]);
    std::fs::write(dir.path().join("users.json"), "[{").unwrap();

    let output = wpreport().arg("report").arg(dir.path()).output().unwrap();
    assert!(!output.status.success());
    assert!(!dir.path().join("report.txt").exists());
}

#[test]
fn test_log_settings_come_from_environment() {
    let dir = common::snapshot_dir(&[]);

    let output = wpreport()
        .arg("report")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .env("WPREPORT_LOG_FORMAT", "json")
        .env("WPREPORT_LOG_LEVEL", "info")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().unwrap_or_default();
    let event: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(event["level"], "INFO");

    let quiet = wpreport()
        .arg("report")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .env("WPREPORT_LOG_LEVEL", "error")
        .output()
        .unwrap();
    assert!(quiet.status.success(), "{quiet:?}");
    assert!(quiet.stderr.is_empty(), "stderr was: {}", String::from_utf8_lossy(&quiet.stderr));
}
