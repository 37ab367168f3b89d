//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <title>Checkout</title>
  <meta name="description" content="Pay for your order">
</head>
<body>
  <header><a href="/">Home</a></header>
  <main>
    <h1>Checkout</h1>
    <h2>Payment</h2>
    <form id="pay" action="/pay">
      <label for="card">Card number</label>
      <input id="card" name="card" autocomplete="cc-number" required>
      <input name="coupon">
      <button type="submit">Pay now</button>
    </form>
    <a href="/terms">Read more</a>
    <img src="/logo.png" alt="Shop logo">
  </main>
</body>
</html>"#;

/// Write `content` to `name` inside a fresh temp dir.
fn fixture(name: &str, content: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    (tmp, path)
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("inventory"))
        .stdout(predicate::str::contains("readability"))
        .stdout(predicate::str::contains("axe"));
}

#[test]
fn long_help_lists_environment_variables() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("UX_LINT_LOG_PATH"))
        .stdout(predicate::str::contains("UX_LINT_MAX_INPUT_BYTES"));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

// =============================================================================
// Info
// =============================================================================

#[test]
fn info_json_outputs_valid_json() {
    let json = stdout_json(cmd().args(["info", "--json"]));
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"]["max_chars"].is_u64());
}

#[test]
fn global_flags_accepted() {
    for flags in [
        &["--quiet"][..],
        &["-vv"],
        &["--color", "never"],
        &["--color", "always"],
    ] {
        cmd().args(flags).arg("info").assert().success();
    }
}

// =============================================================================
// Inventory
// =============================================================================

#[test]
fn inventory_renders_markdown_for_files() {
    let (_tmp, path) = fixture("checkout.html", PAGE);
    cmd()
        .args(["inventory", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# UI inventory ("))
        .stdout(predicate::str::contains("checkout.html"))
        .stdout(predicate::str::contains("Checkout"));
}

#[test]
fn inventory_json_carries_source_and_issues() {
    let (_tmp, path) = fixture("checkout.html", PAGE);
    let json = stdout_json(cmd().args(["inventory", path.to_str().unwrap(), "--json"]));

    assert_eq!(json["source"]["type"], "file");
    assert!(json["source"]["path"].as_str().unwrap().ends_with("checkout.html"));
    assert_eq!(json["page"]["title"], "Checkout");
    assert_eq!(json["page"]["metaDescription"], "Pay for your order");
    assert_eq!(json["page"]["lang"], "en");
    assert_eq!(json["landmarks"]["main"], true);
    assert_eq!(json["counts"]["headings"], 2);
    assert_eq!(json["forms"][0]["fields"][0]["label"], "Card number");
    assert_eq!(json["forms"][0]["fields"][0]["required"], true);

    let kinds: Vec<&str> = json["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|issue| issue["type"].as_str())
        .collect();
    assert_eq!(kinds, vec!["generic-link-text", "unlabeled-form-fields"]);
}

#[test]
fn inventory_accepts_inline_markup() {
    let json = stdout_json(cmd().args(["inventory", "--html", "<p>No structure</p>", "--json"]));
    assert_eq!(json["source"]["type"], "html");
    let kinds: Vec<&str> = json["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|issue| issue["type"].as_str())
        .collect();
    assert_eq!(kinds, vec!["missing-title", "missing-lang", "missing-h1"]);
}

#[test]
fn inventory_fail_on_threshold() {
    let (_tmp, path) = fixture("checkout.html", PAGE);
    cmd()
        .args(["inventory", path.to_str().unwrap(), "--fail-on", "medium"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue(s) at or above medium"));

    cmd()
        .args([
            "inventory",
            "--html",
            r#"<html lang="en"><title>Home</title><h1>Welcome</h1></html>"#,
            "--fail-on",
            "low",
        ])
        .assert()
        .success();
}

#[test]
fn inventory_requires_exactly_one_input() {
    cmd().arg("inventory").assert().failure();

    let (_tmp, path) = fixture("checkout.html", PAGE);
    cmd()
        .args(["inventory", path.to_str().unwrap(), "--html", "<p>x</p>"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn inventory_rejects_out_of_range_limit() {
    cmd()
        .args(["inventory", "--html", "<p>x</p>", "--max-elements", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maxElementsPerCategory must be between 10 and 500"));
}

#[test]
fn inventory_missing_file_fails() {
    cmd()
        .args(["inventory", "/definitely/not/here.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load input"));
}

// =============================================================================
// Readability
// =============================================================================

#[test]
fn readability_scores_text() {
    let json = stdout_json(cmd().args([
        "readability",
        "--text",
        "The cat sat on the mat. The dog ran fast.",
        "--json",
    ]));
    assert_eq!(json["source"]["type"], "text");
    assert_eq!(json["metrics"]["counts"]["words"], 10);
    assert_eq!(json["metrics"]["counts"]["sentences"], 2);
    assert_eq!(json["findings"][0]["type"], "small-sample");
}

#[test]
fn readability_uses_body_text_of_files() {
    let (_tmp, path) = fixture(
        "doc.html",
        "<html><head><title>Lots of title words here</title></head>\
         <body><p>Short words win.</p><script>let ignored = true;</script></body></html>",
    );
    let json = stdout_json(cmd().args(["readability", path.to_str().unwrap(), "--json"]));
    assert_eq!(json["source"]["type"], "file");
    assert_eq!(json["metrics"]["counts"]["words"], 3);
}

#[test]
fn readability_markdown_lists_long_sentences() {
    let long = "This sentence keeps going with many small words so that it easily passes \
                the limit of words that a reader would want to see in one go.";
    cmd()
        .args(["readability", "--text", long, "--long-sentence-max-words", "10"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Readability lint (text)"))
        .stdout(predicate::str::contains("## Long sentences (examples)"));
}

#[test]
fn readability_fail_on_info_trips_on_small_samples() {
    cmd()
        .args(["readability", "--text", "Tiny text.", "--fail-on", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finding(s) at or above info"));
}

#[test]
fn readability_rejects_out_of_range_options() {
    cmd()
        .args(["readability", "--text", "Hi.", "--max-chars", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maxChars"));
}

#[test]
fn readability_rejects_blank_text() {
    cmd()
        .args(["readability", "--text", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--text must not be empty or whitespace"));
}

// =============================================================================
// Axe
// =============================================================================

const AXE_RESULTS: &str = r#"{
  "violations": [
    {"id": "image-alt", "impact": "critical", "description": "Images must have alt text",
     "help": "Images must have alternate text", "helpUrl": "https://example.test/image-alt",
     "tags": ["wcag2a"],
     "nodes": [
        {"html": "<img src=a.png>", "target": ["img:nth-child(1)"], "failureSummary": "Add alt"},
        {"html": "<img src=b.png>", "target": ["img:nth-child(2)"]}
     ]},
    {"id": "color-contrast", "impact": "serious", "nodes": []},
    {"id": "region", "nodes": []}
  ],
  "passes": []
}"#;

#[test]
fn axe_summarizes_results_file() {
    let (_tmp, path) = fixture("axe.json", AXE_RESULTS);
    let json = stdout_json(cmd().args(["axe", path.to_str().unwrap(), "--json"]));

    assert_eq!(json["summary"]["violations"], 3);
    assert_eq!(json["summary"]["byImpact"]["critical"], 1);
    assert_eq!(json["summary"]["byImpact"]["serious"], 1);
    assert_eq!(json["summary"]["byImpact"]["unknown"], 1);
    assert_eq!(json["violations"][0]["helpUrl"], "https://example.test/image-alt");
}

#[test]
fn axe_caps_violations_and_nodes() {
    let (_tmp, path) = fixture("axe.json", AXE_RESULTS);
    let json = stdout_json(cmd().args([
        "axe",
        path.to_str().unwrap(),
        "--max-violations",
        "1",
        "--max-nodes",
        "1",
        "--json",
    ]));

    assert_eq!(json["summary"]["violations"], 1);
    assert_eq!(json["violations"].as_array().unwrap().len(), 1);
    assert_eq!(json["violations"][0]["nodes"].as_array().unwrap().len(), 1);
}

#[test]
fn axe_markdown_shows_node_examples() {
    let (_tmp, path) = fixture("axe.json", AXE_RESULTS);
    cmd()
        .args(["axe", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Top violations"))
        .stdout(predicate::str::contains("Add alt"));
}

#[test]
fn axe_invalid_json_fails() {
    let (_tmp, path) = fixture("axe.json", "{not json");
    cmd()
        .args(["axe", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read results"));
}

// =============================================================================
// Guides
// =============================================================================

#[test]
fn guide_lists_all_guides() {
    cmd()
        .arg("guide")
        .assert()
        .success()
        .stdout(predicate::str::contains("nielsen-heuristics"))
        .stdout(predicate::str::contains("ux://checklist/forms"));
}

#[test]
fn guide_prints_markdown_body() {
    cmd()
        .args(["guide", "pour-wcag"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Accessibility framing: POUR"));
}

#[test]
fn unknown_guide_fails() {
    cmd()
        .args(["guide", "style-guide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// =============================================================================
// Working directory
// =============================================================================

#[test]
fn chdir_resolves_relative_inputs() {
    let (tmp, _path) = fixture("checkout.html", PAGE);
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "inventory", "checkout.html"])
        .assert()
        .success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to change directory"));
}
