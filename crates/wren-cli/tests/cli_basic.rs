//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run with HOME pointed at a temp
//! directory so each test gets its own settings and database.

use std::path::Path;
use std::process::Command;

/// Run a CLI command under the given home directory and return output.
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-p", "wren-cli", "--"])
        .args(args)
        .env("HOME", home)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn config_show_prints_defaults() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("auto_clear_interval"));
    assert!(stdout.contains("never"));
}

#[test]
fn config_set_then_get_roundtrips() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(
        home.path(),
        &["config", "set", "privacy.auto_clear_interval", "minutes_15"],
    );
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(
        home.path(),
        &["config", "get", "privacy.auto_clear_interval"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "minutes_15");
}

#[test]
fn config_get_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "privacy.bogus"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown settings key"));
}

#[test]
fn usage_record_counts_one_day_once() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["usage", "record"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"recorded\":true"));

    let (code, stdout, _) = run_cli(home.path(), &["usage", "record"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"recorded\":false"));

    let (code, stdout, _) = run_cli(home.path(), &["usage", "status"]);
    assert_eq!(code, 0);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["days_used"], 1);
    assert_eq!(status["recorded_today"], true);
}

#[test]
fn cold_start_records_usage_and_enables_rating_check() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["lifecycle", "cold-start"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("UsageRecorded"));

    // One day used: below the initial threshold, so no prompt.
    let (code, stdout, _) = run_cli(home.path(), &["rating", "check"]);
    assert_eq!(code, 0);
    let decision: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(decision["type"], "PromptDecision");
    assert_eq!(decision["prompt"], serde_json::Value::Null);
}

#[test]
fn rating_answer_roundtrips_through_status() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["rating", "answer", "not_enjoying"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("EnjoymentAnswerRecorded"));

    let (code, stdout, _) = run_cli(home.path(), &["rating", "status"]);
    assert_eq!(code, 0);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["current_answer"], "not_enjoying");
}

#[test]
fn rating_answer_rejects_unknown_value() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["rating", "answer", "meh"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown answer"));
}

#[test]
fn background_with_interval_schedules_a_clear() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(
        home.path(),
        &["config", "set", "privacy.auto_clear_interval", "minutes_5"],
    );
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(home.path(), &["lifecycle", "background"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("DataClearScheduled"));

    // Immediate resume: interval not exceeded, nothing cleared.
    let (code, stdout, _) = run_cli(home.path(), &["lifecycle", "foreground"]);
    assert_eq!(code, 0);
    assert!(!stdout.contains("DataCleared"));
}

#[test]
fn background_with_never_interval_schedules_nothing() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["lifecycle", "background"]);
    assert_eq!(code, 0);
    assert!(!stdout.contains("DataClearScheduled"));
}
