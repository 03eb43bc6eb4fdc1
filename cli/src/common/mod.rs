//! # Ketch Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities sitting underneath the command builder:
//!
//! - **`process`**: the launch capability (`Launcher` trait, `SystemLauncher`,
//!   `LaunchOptions`, `LaunchOutput`).
//! - **`system`**: host inspection, currently shell selection for whole-command
//!   launches.
//!

/// Launching external processes and capturing their output.
pub mod process;
/// Host system helpers (shell selection).
pub mod system;
