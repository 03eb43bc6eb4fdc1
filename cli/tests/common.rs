//! # Ketch CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates under `cli/tests/`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// Returns an `assert_cmd::Command` for the compiled `ketch` binary.
///
/// ## Panics
/// Panics if the `ketch` binary cannot be found via `Command::cargo_bin`.
pub fn ketch_cmd() -> Command {
    Command::cargo_bin("ketch").expect("Failed to find ketch binary for testing")
}

/// `ketch run --config <path>`, ready for more arguments.
///
/// Passing an explicit config keeps a developer's own user or project
/// configuration out of test results.
pub fn ketch_run_with_config(config: &Path) -> Command {
    let mut cmd = ketch_cmd();
    cmd.arg("run").arg("--config").arg(config);
    cmd
}

/// Writes `contents` as a config file inside `dir` and returns its path.
pub fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("ketch.toml");
    std::fs::write(&path, contents).expect("Failed to write test config");
    path
}
