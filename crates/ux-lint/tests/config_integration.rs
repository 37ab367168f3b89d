//! Configuration integration tests.
//!
//! These run the compiled binary and read effective settings back through
//! `info --json`, or observe them through analysis commands.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    for var in [
        "UX_LINT_MAX_INPUT_BYTES",
        "UX_LINT_MAX_ELEMENTS_PER_CATEGORY",
        "UX_LINT_LONG_SENTENCE_MAX_WORDS",
        "UX_LINT_MAX_CHARS",
        "UX_LINT_FETCH_TIMEOUT_MS",
        "UX_LINT_LOG_LEVEL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &std::path::Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert!(json["config"]["config_file"].is_null());
    assert_eq!(json["config"]["max_elements_per_category"], 60);
    assert_eq!(json["config"]["long_sentence_max_words"], 22);
    assert_eq!(json["config"]["max_chars"], 50_000);
    assert_eq!(json["config"]["max_input_bytes"], 2_000_000);
    assert_eq!(json["config"]["fetch_timeout_ms"], 15_000);
}

#[test]
fn discovers_every_project_file_name() {
    for name in [".ux.toml", "ux.toml", ".ux-lint.toml", "ux-lint.toml"] {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(name), "max_chars = 1000\n").unwrap();

        let json = info_json(tmp.path());
        assert_eq!(json["config"]["max_chars"], 1000, "{name} not loaded");
        let reported = json["config"]["config_file"].as_str().unwrap();
        assert!(reported.ends_with(name), "expected {name}, got {reported}");
    }
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("site").join("pages");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(
        tmp.path().join(".ux-lint.toml"),
        "long_sentence_max_words = 30\n",
    )
    .unwrap();

    let json = info_json(&sub_dir);
    assert_eq!(json["config"]["long_sentence_max_words"], 30);
}

#[test]
fn closer_config_takes_precedence() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("nested");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(
        tmp.path().join(".ux-lint.toml"),
        "max_elements_per_category = 100\n",
    )
    .unwrap();
    fs::write(
        sub_dir.join(".ux-lint.toml"),
        "max_elements_per_category = 20\n",
    )
    .unwrap();

    let json = info_json(&sub_dir);
    assert_eq!(json["config"]["max_elements_per_category"], 20);
}

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let parent = tmp.path();
    let repo = parent.join("repo");
    let pages = repo.join("pages");
    fs::create_dir_all(&pages).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(parent.join(".ux-lint.toml"), "max_chars = 1000\n").unwrap();

    let json = info_json(&pages);
    assert_eq!(json["config"]["max_chars"], 50_000);
    assert!(json["config"]["config_file"].is_null());
}

// =============================================================================
// Formats
// =============================================================================

#[test]
fn parses_yaml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ux-lint.yaml"),
        "log_level: warn\nfetch_timeout_ms: 5000\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "warn");
    assert_eq!(json["config"]["fetch_timeout_ms"], 5000);
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ux-lint.json"),
        r#"{"log_level": "debug", "disable_input_limit": true}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "debug");
    assert!(json["config"]["max_input_bytes"].is_null());
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ux-lint.toml"),
        "max_chars = 2000\ntheme = \"dark\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["max_chars"], 2000);
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".ux-lint.toml"), "max_chars = 1000\n").unwrap();
    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, "max_chars = 3000\n").unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["max_chars"], 3000);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with("override.toml"));
}

#[test]
fn environment_overrides_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ux-lint.toml"),
        "max_elements_per_category = 100\n",
    )
    .unwrap();

    let output = cmd()
        .env("UX_LINT_MAX_ELEMENTS_PER_CATEGORY", "40")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["max_elements_per_category"], 40);
}

// =============================================================================
// Effects on analysis
// =============================================================================

#[test]
fn configured_input_limit_rejects_large_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ux-lint.toml"),
        "max_input_bytes = 100\n",
    )
    .unwrap();
    fs::write(tmp.path().join("page.html"), "<p>padding</p>".repeat(20)).unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "inventory", "page.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn flag_overrides_configured_input_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ux-lint.toml"),
        "max_input_bytes = 100\n",
    )
    .unwrap();
    fs::write(tmp.path().join("page.html"), "<p>padding</p>".repeat(20)).unwrap();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "inventory",
            "page.html",
            "--max-bytes",
            "10000",
        ])
        .assert()
        .success();
}

#[test]
fn configured_sentence_threshold_is_used() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ux-lint.toml"),
        "long_sentence_max_words = 10\n",
    )
    .unwrap();
    let sentence = "one two three four five six seven eight nine ten eleven twelve.";

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "readability",
            "--text",
            sentence,
            "--json",
        ])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["longSentences"][0]["words"], 12);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ux-lint.toml"),
        "this is not valid toml [[[",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration").or(predicate::str::contains("config")));
}

#[test]
fn wrongly_typed_setting_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ux-lint.toml"),
        "max_chars = \"lots\"\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}
