//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a temporary data
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against the given data directory and return output.
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "consumable-cli", "--quiet", "--"])
        .args(args)
        .env("CONSUMABLE_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Pull the record id out of the "Added '<name>' (<id>)" line.
fn added_id(stdout: &str) -> String {
    let open = stdout.rfind('(').expect("no id in add output");
    let close = stdout.rfind(')').expect("no id in add output");
    stdout[open + 1..close].to_string()
}

#[test]
fn test_help_runs() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Consumable expiration tracker CLI"));
}

#[test]
fn test_item_add_and_status_roundtrip() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &[
            "item",
            "add",
            "Kitchen Water Filter",
            "--item-type",
            "water filter",
            "--duration",
            "90",
        ],
    );
    assert_eq!(code, 0, "add failed: {stderr}");
    assert!(stdout.contains("Added 'Kitchen Water Filter'"));
    let id = added_id(stdout.lines().next().unwrap());

    let (stdout, _, code) = run_cli(dir.path(), &["item", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Kitchen Water Filter"));

    // Freshly added with start = today, so the full life remains.
    let (stdout, _, code) = run_cli(dir.path(), &["status", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("90 days remaining"), "status was: {stdout}");
}

#[test]
fn test_set_expiry_back_computes_start() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(
        dir.path(),
        &[
            "item",
            "add",
            "AC Filter",
            "--duration",
            "30",
            "--start-date",
            "2024-01-01",
        ],
    );
    assert_eq!(code, 0);
    let id = added_id(stdout.lines().next().unwrap());

    let (stdout, stderr, code) = run_cli(dir.path(), &["item", "set-expiry", &id, "2024-02-10"]);
    assert_eq!(code, 0, "set-expiry failed: {stderr}");
    assert!(stdout.contains("30 days from 2024-01-11"), "got: {stdout}");
}

#[test]
fn test_verbose_emits_debug_trail() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["--verbose", "item", "list"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("opened store at"), "stderr was: {stderr}");
}

#[test]
fn test_unknown_entity_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["item", "replace", "sensor.ghost"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("sensor.ghost"), "stderr was: {stderr}");
}

#[test]
fn test_entity_bind_and_verbs_through_alias() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["item", "add", "Vacuum Brush", "--duration", "60"],
    );
    assert_eq!(code, 0);
    let id = added_id(stdout.lines().next().unwrap());

    let (_, stderr, code) = run_cli(
        dir.path(),
        &["entity", "bind", "sensor.vacuum_brush_days", &id],
    );
    assert_eq!(code, 0, "bind failed: {stderr}");

    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["item", "set-start", "sensor.vacuum_brush_days", "2024-03-01"],
    );
    assert_eq!(code, 0, "set-start failed: {stderr}");
    assert!(stdout.contains("60 days from 2024-03-01"), "got: {stdout}");
}
