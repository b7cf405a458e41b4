//! Integration tests for the `rackplan` CLI binary.
//!
//! These tests cover argument parsing, help output, shell completions,
//! error exit codes and a few end-to-end solves through site files.
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

const NO_HOME: &str = "/tmp/rackplan-cli-test-nonexistent";

/// Build a [`Command`] for the `rackplan` binary with env isolation.
///
/// Clears the `RACKPLAN_*` env vars the CLI reads and points config
/// directories at a nonexistent path so tests never touch the user's real
/// configuration.
fn rackplan_cmd() -> assert_cmd::Command {
    rackplan_cmd_in(NO_HOME)
}

fn rackplan_cmd_in(home: impl Into<PathBuf>) -> assert_cmd::Command {
    let home = home.into();
    let mut cmd = cargo_bin_cmd!("rackplan");
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", &home)
        .env_remove("RACKPLAN_SITE")
        .env_remove("RACKPLAN_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed:\n{}",
        combined_output(output)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write_site(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("site.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

const DUAL_SITE: &str = r#"
name = "Hilltop"

[intent]
family = "macro_dual"
sectors = 3
bands = ["L1800", "L2100", "NR3500"]
mimo = "2x2"
tdd_links = 2
"#;

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = rackplan_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    rackplan_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("site intent")
            .and(predicate::str::contains("topology"))
            .and(predicate::str::contains("wiring"))
            .and(predicate::str::contains("bom")),
    );
}

#[test]
fn test_version_flag() {
    rackplan_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rackplan"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    rackplan_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    rackplan_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    rackplan_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = rackplan_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = rackplan_cmd()
        .args(["--output", "invalid", "topology"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("invalid"), "Expected rejection of 'invalid':\n{text}");
}

#[test]
fn test_unknown_band_is_usage_error() {
    rackplan_cmd()
        .args(["--band", "L1900", "topology"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("L1900"));
}

#[test]
fn test_zero_sectors_is_usage_error() {
    rackplan_cmd()
        .args(["--sectors", "0", "topology"])
        .assert()
        .code(2);
}

#[test]
fn test_module_outside_family_is_usage_error() {
    rackplan_cmd()
        .args([
            "--family", "micro", "--band", "L2600", "--module", "L2600=AHHB", "topology",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("AHHB"));
}

#[test]
fn test_missing_site_file_is_not_found() {
    rackplan_cmd()
        .args(["--site", "/tmp/rackplan-no-such-site.toml", "topology"])
        .assert()
        .code(4);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    rackplan_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = tempfile::tempdir().unwrap();
    let path_out = rackplan_cmd_in(home.path())
        .args(["config", "path"])
        .output()
        .unwrap();
    let path = PathBuf::from(String::from_utf8_lossy(&path_out.stdout).trim());

    rackplan_cmd_in(home.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.is_file(), "expected config at {}", path.display());

    rackplan_cmd_in(home.path())
        .args(["config", "init"])
        .assert()
        .code(6);
    rackplan_cmd_in(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

// ── Solving ─────────────────────────────────────────────────────────

#[test]
fn test_topology_table_has_summary() {
    rackplan_cmd()
        .args(["--color", "never", "topology"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary").and(predicate::str::contains("Bay 1")));
}

#[test]
fn test_wiring_json_from_flags() {
    let output = rackplan_cmd()
        .args(["--band", "L1800,L2100,NR3500", "-o", "json", "wiring"])
        .output()
        .unwrap();
    let rows = stdout_json(&output);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["slot"], "B1");
    assert_eq!(rows[0]["card"], "ABIO (FDD)");
    assert_eq!(rows[0]["port"], 1);
    assert!(rows[1..].iter().all(|r| r["card"] == "ABIO (TDD)"));
}

#[test]
fn test_bom_plain_default_site() {
    rackplan_cmd()
        .args(["-o", "plain", "bom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AMIA\t1").and(predicate::str::contains("FYGA\t1")));
}

#[test]
fn test_modules_listing_filters() {
    rackplan_cmd()
        .args(["--family", "micro", "--band", "L900", "-o", "plain", "modules"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    rackplan_cmd()
        .args(["--family", "macro_dual", "--band", "NR3500", "-o", "plain", "modules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AZQJ"));
}

#[test]
fn test_site_file_edits_are_replayed() {
    let dir = tempfile::tempdir().unwrap();
    let site = write_site(
        &dir,
        &format!("{DUAL_SITE}\n[edits]\ndelete = [\"conn-7\"]\n"),
    );
    let output = rackplan_cmd()
        .args(["--site", site.to_str().unwrap(), "-o", "json", "wiring"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 2);
}

#[test]
fn test_flags_override_site_file() {
    let dir = tempfile::tempdir().unwrap();
    let site = write_site(&dir, DUAL_SITE);
    let output = rackplan_cmd()
        .args([
            "--site",
            site.to_str().unwrap(),
            "--band",
            "L1800",
            "-o",
            "json",
            "radios",
        ])
        .output()
        .unwrap();
    let units = stdout_json(&output);
    let units = units.as_array().unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0]["hardware"], "AHEGC");
}

#[test]
fn test_bad_edit_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let site = write_site(
        &dir,
        &format!("{DUAL_SITE}\n[edits]\ndelete = [\"conn-99\"]\n"),
    );
    rackplan_cmd()
        .args(["--site", site.to_str().unwrap(), "wiring"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("conn-99"));
}

// ── Subcommand help ─────────────────────────────────────────────────

#[test]
fn test_config_help() {
    rackplan_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("path")),
        );
}
