// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Key name suggestions for overlay validation.

use std::path::Path;

/// Known `[test]` keys.
pub(super) const KNOWN_TEST_KEYS: &[&str] = &[
    "environment",
    "exclude",
    "root",
    "globals",
    "coverage",
    "reporters",
    "output_file",
];

/// Known `[test.coverage]` keys.
pub(super) const KNOWN_COVERAGE_KEYS: &[&str] = &["provider", "reporter", "exclude", "thresholds"];

/// Suggest a `[test]` key for a typo.
pub fn suggest_test_key(unknown: &str) -> Option<&'static str> {
    // Empty strings can't be typos
    if unknown.is_empty() {
        return None;
    }

    let suggestion = match unknown {
        // environment
        "env" | "environ" | "testEnvironment" | "sandbox" => Some("environment"),
        // exclude
        "excludes" | "ignore" | "skip" | "excludePatterns" => Some("exclude"),
        // root
        "dir" | "cwd" | "rootDir" | "rootPath" => Some("root"),
        // globals
        "global" | "globalsEnabled" => Some("globals"),
        // reporters
        "reporter" | "report" => Some("reporters"),
        // output_file
        "outputFile" | "output" | "outfile" | "output_files" => Some("output_file"),
        // coverage
        "cov" | "instrument" => Some("coverage"),
        _ => None,
    };

    suggestion.or_else(|| prefix_match(unknown, KNOWN_TEST_KEYS))
}

/// Suggest a `[test.coverage]` key for a typo.
pub fn suggest_coverage_key(unknown: &str) -> Option<&'static str> {
    if unknown.is_empty() {
        return None;
    }

    let suggestion = match unknown {
        "reporters" | "format" | "formats" => Some("reporter"),
        "threshold" | "minimum" | "min" => Some("thresholds"),
        "excludes" | "ignore" => Some("exclude"),
        "engine" | "backend" => Some("provider"),
        _ => None,
    };

    suggestion.or_else(|| prefix_match(unknown, KNOWN_COVERAGE_KEYS))
}

/// Prefix matching (at least 2 chars to avoid false positives).
fn prefix_match(unknown: &str, known: &[&'static str]) -> Option<&'static str> {
    if unknown.len() < 2 {
        return None;
    }
    known
        .iter()
        .copied()
        .find(|name| name.starts_with(unknown) || unknown.starts_with(name))
}

/// Warn about an unknown `[test]` key with suggestion.
pub(super) fn warn_unknown_test_key(path: &Path, key: &str) {
    warn_with_suggestion(path, "test", key, suggest_test_key(key), KNOWN_TEST_KEYS);
}

/// Warn about an unknown `[test.coverage]` key with suggestion.
pub(super) fn warn_unknown_coverage_key(path: &Path, key: &str) {
    warn_with_suggestion(
        path,
        "test.coverage",
        key,
        suggest_coverage_key(key),
        KNOWN_COVERAGE_KEYS,
    );
}

fn warn_with_suggestion(
    path: &Path,
    section: &str,
    key: &str,
    suggestion: Option<&str>,
    known: &[&str],
) {
    if let Some(suggested) = suggestion {
        eprintln!(
            "testrig: warning: {}: unknown key `{}.{}`. Did you mean `{}`?",
            path.display(),
            section,
            key,
            suggested
        );
    } else {
        eprintln!(
            "testrig: warning: {}: unknown key `{}.{}`\n  Valid keys: {}",
            path.display(),
            section,
            key,
            known.join(", ")
        );
    }
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod tests;
