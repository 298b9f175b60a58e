//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for testing testrig CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::Path;
use std::process::Command;

/// Returns a Command configured to run the testrig binary
pub fn testrig_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("testrig"));
    cmd.env_remove("TESTRIG_CONFIG").env_remove("TESTRIG_LOG");
    cmd
}

/// Run `testrig compose` in `project` and parse the JSON it prints.
pub fn compose_json(project: &Project, args: &[&str]) -> serde_json::Value {
    let output = testrig_cmd()
        .arg("compose")
        .args(args)
        .current_dir(project.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "compose failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// A temporary project directory.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create a project with a minimal testrig.toml
    pub fn with_defaults() -> Self {
        let temp = Self::empty();
        temp.config("");
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write testrig.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("testrig.toml"), content).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }
}

/// Overlay mirroring a typical DOM-based frontend project.
pub const FRONTEND_OVERLAY: &str = r#"
[test]
environment = "jsdom"
exclude = ["e2e/**"]
globals = true
reporters = ["default", "vitest-sonar-reporter"]

[test.output_file]
vitest-sonar-reporter = "sonar-report.xml"

[test.coverage]
provider = "v8"
reporter = ["text", "json", "html", "lcov"]
exclude = ["node_modules/", "dist/", "**/*.d.ts", "tests/**"]

[test.coverage.thresholds.global]
branches = 80
functions = 80
lines = 80
statements = 80
"#;
