//! Behavioral specs for `testrig compose`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;
use serde_json::json;

// =============================================================================
// COMPOSITION SPECS
// =============================================================================

/// > With no base, the merged config is the overlay under `test`
#[test]
fn compose_without_base_emits_test_section() {
    let temp = Project::empty();
    temp.config(FRONTEND_OVERLAY);

    let merged = compose_json(&temp, &[]);
    let test = &merged["test"];
    assert_eq!(test["environment"], json!("jsdom"));
    assert_eq!(test["globals"], json!(true));
    assert_eq!(test["coverage"]["provider"], json!("v8"));
    assert_eq!(test["coverage"]["thresholds"]["branches"], json!(80));
    assert_eq!(
        test["outputFile"]["vitest-sonar-reporter"],
        json!("sonar-report.xml")
    );
    assert_same_dir(&test["root"], temp.path());
}

/// > Default exclusions come first; project entries are appended
#[test]
fn compose_appends_exclusions_after_defaults() {
    let temp = Project::empty();
    temp.config(FRONTEND_OVERLAY);

    let merged = compose_json(&temp, &[]);
    let exclude: Vec<&str> = merged["test"]["exclude"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(exclude.first(), Some(&"**/node_modules/**"));
    assert_eq!(exclude.last(), Some(&"e2e/**"));
}

/// > Base keys survive; overlay keys win on collision
#[test]
fn compose_merges_base_file() {
    let temp = Project::empty();
    temp.config(FRONTEND_OVERLAY);
    temp.file(
        "vite.config.json",
        r#"{ "plugins": ["vue"], "test": { "environment": "node", "pool": "forks" } }"#,
    );

    let merged = compose_json(&temp, &["--base", "vite.config.json"]);
    assert_eq!(merged["plugins"], json!(["vue"]));
    assert_eq!(merged["test"]["pool"], json!("forks"));
    assert_eq!(merged["test"]["environment"], json!("jsdom"));
}

/// > Settings the overlay leaves out keep the base's values
#[test]
fn compose_keeps_base_values_the_overlay_omits() {
    let temp = Project::empty();
    temp.config("[test]\nexclude = [\"e2e/**\"]\n");
    temp.file(
        "vite.config.json",
        r#"{ "test": { "environment": "jsdom", "globals": true, "coverage": { "provider": "istanbul" } } }"#,
    );

    let merged = compose_json(&temp, &["--base", "vite.config.json"]);
    assert_eq!(merged["test"]["environment"], json!("jsdom"));
    assert_eq!(merged["test"]["globals"], json!(true));
    assert_eq!(merged["test"]["coverage"]["provider"], json!("istanbul"));
    assert_eq!(merged["test"]["exclude"].as_array().unwrap().last(), Some(&json!("e2e/**")));
}

/// > Fractional thresholds are emitted as written
#[test]
fn compose_keeps_fractional_thresholds() {
    let temp = Project::empty();
    temp.config("[test.coverage.thresholds]\nbranches = 87.5\nlines = 90\n");

    let merged = compose_json(&temp, &[]);
    let thresholds = &merged["test"]["coverage"]["thresholds"];
    assert_eq!(thresholds, &json!({ "branches": 87.5, "lines": 90 }));
}

/// > YAML and TOML base files are accepted
#[test]
fn compose_reads_yaml_and_toml_bases() {
    let temp = Project::with_defaults();
    temp.file("vite.yaml", "server:\n  port: 5173\n");
    temp.file("vite.toml", "[build]\noutDir = \"dist\"\n");

    let from_yaml = compose_json(&temp, &["--base", "vite.yaml"]);
    assert_eq!(from_yaml["server"]["port"], json!(5173));

    let from_toml = compose_json(&temp, &["--base", "vite.toml"]);
    assert_eq!(from_toml["build"]["outDir"], json!("dist"));
}

/// > --arrays concat appends overlay sequences to base sequences
#[test]
fn compose_concat_policy_flag() {
    let temp = Project::empty();
    temp.config("[test]\nreporters = [\"junit\"]\n");
    temp.file("vite.json", r#"{ "test": { "reporters": ["verbose"] } }"#);

    let replaced = compose_json(&temp, &["--base", "vite.json"]);
    assert_eq!(replaced["test"]["reporters"], json!(["junit"]));

    let concatenated = compose_json(&temp, &["--base", "vite.json", "--arrays", "concat"]);
    assert_eq!(concatenated["test"]["reporters"], json!(["verbose", "junit"]));
}

/// > [merge] arrays in the overlay file selects the policy
#[test]
fn compose_concat_policy_from_overlay() {
    let temp = Project::empty();
    temp.config("[merge]\narrays = \"concat\"\n[test]\nreporters = [\"junit\"]\n");
    temp.file("vite.json", r#"{ "test": { "reporters": ["verbose"] } }"#);

    let merged = compose_json(&temp, &["--base", "vite.json"]);
    assert_eq!(merged["test"]["reporters"], json!(["verbose", "junit"]));
}

/// > --out writes the merged config to a file
#[test]
fn compose_writes_yaml_file() {
    let temp = Project::with_defaults();

    testrig_cmd()
        .args(["compose", "--out", "merged.yaml"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicates::str::is_empty());

    let text = std::fs::read_to_string(temp.path().join("merged.yaml")).unwrap();
    assert!(text.contains("test:"));
    assert!(text.contains("**/node_modules/**"));
}

// =============================================================================
// ERROR SPECS
// =============================================================================

/// > A threshold above 100 is an invalid config shape (exit 2)
#[test]
fn compose_rejects_threshold_over_hundred() {
    let temp = Project::empty();
    temp.config("[test.coverage.thresholds]\nbranches = 150\n");

    testrig_cmd()
        .arg("compose")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("invalid config shape"))
        .stderr(predicates::str::contains("coverage.thresholds.branches"));
}

/// > A failed compose never creates the --out file
#[test]
fn compose_failure_leaves_no_output_file() {
    let temp = Project::empty();
    temp.config("[test.coverage.thresholds]\nbranches = 150\n");

    testrig_cmd()
        .args(["compose", "--out", "merged.json"])
        .current_dir(temp.path())
        .assert()
        .code(2);

    assert!(!temp.path().join("merged.json").exists());
}

/// > A failed compose leaves an existing --out file untouched
#[test]
fn compose_failure_keeps_previous_output() {
    let temp = Project::empty();
    temp.config("[test]\nroot = \"does-not-exist\"\n");
    temp.file("merged.json", "{\"test\":{}}");

    testrig_cmd()
        .args(["compose", "--out", "merged.json"])
        .current_dir(temp.path())
        .assert()
        .code(2);

    let text = std::fs::read_to_string(temp.path().join("merged.json")).unwrap();
    assert_eq!(text, "{\"test\":{}}");
}

/// > A root that doesn't exist is an invalid config shape
#[test]
fn compose_rejects_missing_root() {
    let temp = Project::empty();
    temp.config("[test]\nroot = \"does-not-exist\"\n");

    testrig_cmd()
        .arg("compose")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("root"));
}

/// > A missing overlay file is an error
#[test]
fn compose_without_overlay_fails() {
    let temp = Project::empty();

    testrig_cmd()
        .arg("compose")
        .current_dir(temp.path())
        .assert()
        .code(3)
        .stderr(predicates::str::contains("testrig.toml"));
}

/// > A base that is not a mapping is rejected
#[test]
fn compose_rejects_sequence_base() {
    let temp = Project::with_defaults();
    temp.file("vite.json", "[1, 2, 3]");

    testrig_cmd()
        .args(["compose", "--base", "vite.json"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("expected a mapping"));
}

/// > --config selects another overlay file
#[test]
fn compose_with_config_flag() {
    let temp = Project::empty();
    temp.file("ci/overlay.toml", "version = 1\n[test]\nenvironment = \"happy-dom\"\n");

    let merged = compose_json(&temp, &["-C", "ci/overlay.toml"]);
    assert_eq!(merged["test"]["environment"], json!("happy-dom"));
    assert_same_dir(&merged["test"]["root"], &temp.path().join("ci"));
}

/// Roots are absolute but not canonical; compare the directories they name.
fn assert_same_dir(root: &serde_json::Value, expected: &std::path::Path) {
    let root = std::path::Path::new(root.as_str().unwrap());
    assert!(root.is_absolute(), "root is not absolute: {}", root.display());
    assert_eq!(root.canonicalize().unwrap(), expected.canonicalize().unwrap());
}
