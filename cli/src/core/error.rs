//! # Ketch Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout Ketch. There are two
//! layers:
//!
//! - `LaunchError`: everything the launch capability can report back to a
//!   builder (spawn failures, non-zero exits, timeouts, undecodable output, or
//!   a plain message from a custom launcher). The builder never reinterprets
//!   these; they reach the caller exactly as the launcher produced them.
//! - `KetchError`: application-level failures of the `ketch` binary
//!   (configuration, argument handling, or a wrapped `LaunchError`).
//!
//! `Result<T>` is an alias for `anyhow::Result<T>` so application code can add
//! context freely with `.context(...)`.
//!
//! ## Examples
//!
//! ```ignore
//! match cmd.spawn(None).await {
//!     Ok(output) => print!("{}", output.stdout),
//!     Err(LaunchError::Exit { code, stderr, .. }) => eprintln!("exited {:?}: {}", code, stderr),
//!     Err(e) => return Err(KetchError::from(e))?,
//! }
//! ```
//!
use std::{io, sync::Arc};
use thiserror::Error;

/// Failure reported by a [`Launcher`](crate::common::process::Launcher).
///
/// `LaunchError` is `Clone` so a builder can keep a copy as its last error
/// while handing the original back to the caller. I/O errors are shared
/// behind an `Arc` for that reason.
#[derive(Error, Debug, Clone)]
pub enum LaunchError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("Command failed: {command}, Exit code: {exit}, Output:\n{stderr}", exit = display_code(.code))]
    Exit {
        command: String,
        /// `None` when the process was terminated by a signal.
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Command timed out after {secs}s: {command}")]
    TimedOut { command: String, secs: u64 },

    #[error("Output of '{command}' on {stream} is not valid UTF-8")]
    Encoding {
        command: String,
        stream: &'static str,
    },

    #[error("I/O error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// A failure carried as a bare message; displays exactly as given.
    #[error("{0}")]
    Message(String),
}

impl LaunchError {
    /// Exit code of the child, when the failure was a non-zero exit.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            LaunchError::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<&str> for LaunchError {
    fn from(message: &str) -> Self {
        LaunchError::Message(message.to_string())
    }
}

impl From<String> for LaunchError {
    fn from(message: String) -> Self {
        LaunchError::Message(message)
    }
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

/// Custom error type for the `ketch` application.
#[derive(Error, Debug)]
pub enum KetchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),

    #[error("Launch failed: {source}")]
    Launch {
        #[from]
        source: LaunchError,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
