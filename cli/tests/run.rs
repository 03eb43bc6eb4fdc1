//! # Ketch CLI Run Integration Tests
//!
//! File: cli/tests/run.rs
//!
//! ## Overview
//!
//! `ketch run` executes real processes. These tests use standard Unix tools
//! (`echo`, `sh`, `pwd`, `sleep`) and are compiled on Unix only.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_run_spawns_directly() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    ketch_run_with_config(&cfg)
        .args(["echo", "hello", "world"])
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn test_run_without_shell_does_not_expand() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    ketch_run_with_config(&cfg)
        .args(["echo", "$HOME"])
        .assert()
        .success()
        .stdout("$HOME\n");
}

#[test]
fn test_run_through_shell() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    ketch_run_with_config(&cfg)
        .args(["--shell", "echo out; echo err 1>&2"])
        .assert()
        .success()
        .stdout("out\n")
        .stderr(predicate::str::contains("err"));
}

#[test]
fn test_run_mirrors_exit_code() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    ketch_run_with_config(&cfg)
        .args(["--shell", "echo partial; exit 3"])
        .assert()
        .code(3)
        .stdout("partial\n")
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_run_missing_program_fails() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    ketch_run_with_config(&cfg)
        .args(["ketch-definitely-not-a-program"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to spawn"));
}

#[test]
fn test_run_debug_prints_command() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    ketch_run_with_config(&cfg)
        .args(["--debug", "-o", "n", "echo", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("echo x -n"));
}

#[test]
fn test_run_uses_configured_cwd_and_env() {
    let dir = tempdir().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let cfg = write_config(
        dir.path(),
        &format!(
            "[launch]\ncwd = {:?}\n[launch.env]\nKETCH_MARK = \"from-config\"\n",
            work.display().to_string()
        ),
    );
    ketch_run_with_config(&cfg)
        .args(["--shell", "basename \"$(pwd)\"; echo $KETCH_MARK"])
        .assert()
        .success()
        .stdout("work\nfrom-config\n");
}

#[test]
fn test_run_flags_override_config() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "[launch.env]\nKETCH_MARK = \"from-config\"\n");
    ketch_run_with_config(&cfg)
        .args(["-e", "KETCH_MARK=from-flag", "--shell", "echo $KETCH_MARK"])
        .assert()
        .success()
        .stdout("from-flag\n");
}

#[test]
fn test_run_timeout() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    ketch_run_with_config(&cfg)
        .args(["--timeout", "1", "sleep", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timed out"));
}

#[test]
fn test_run_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "[launch]\ntimeout_secs = 0\n");
    ketch_run_with_config(&cfg)
        .args(["echo", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load Ketch configuration"));
}

#[test]
fn test_run_rejects_bad_env_flag() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "");
    ketch_run_with_config(&cfg)
        .args(["-e", "NOEQUALS", "echo", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected KEY=VALUE"));
}
