//! # Ketch Execution Adapter (`builder::exec`)
//!
//! File: cli/src/builder/exec.rs
//!
//! ## Overview
//!
//! Bridges a built command to its [`Launcher`](crate::common::process::Launcher).
//! Two launch kinds are available:
//!
//! - **`exec`** (`LaunchKind::Exec`): hands the space-joined rendering to
//!   `launch_whole`, which runs it through a shell.
//! - **`spawn`** (`LaunchKind::Spawn`): hands the `(program, args)` pair to
//!   `launch_split`, which runs the program directly.
//!
//! ## Result delivery
//!
//! Every method returns a future resolving to `Result<LaunchOutput, LaunchError>`.
//! The `*_with` variants additionally take a node-style callback,
//! `(error, stdout, stderr)`, which is notified from the same execution path
//! right before the future resolves. There is exactly one launch per call
//! either way.
//!
//! After each call the builder keeps what happened:
//!
//! - `last_cmd(kind)`: the rendered command, recorded before launching;
//! - `last_stdout()` / `last_stderr()`: set on success;
//! - `last_error()`: set on failure.
//!
//! A later success does not clear `last_error`; use `clear_last_outcome()` for
//! that. Executions borrow the builder mutably, so one instance cannot run two
//! commands at once; use separate builders for concurrent launches.
//!
use super::Ketch;
use crate::common::process::{LaunchOptions, LaunchOutput};
use crate::core::error::LaunchError;
use std::fmt;
use tracing::{debug, warn};

/// How a command is handed to the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchKind {
    /// Whole command string through a shell.
    Exec,
    /// Program plus argument list, no shell.
    Spawn,
}

impl fmt::Display for LaunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchKind::Exec => f.write_str("exec"),
            LaunchKind::Spawn => f.write_str("spawn"),
        }
    }
}

impl Ketch {
    /// Runs the rendered command through a shell.
    pub async fn exec(
        &mut self,
        options: Option<&LaunchOptions>,
    ) -> Result<LaunchOutput, LaunchError> {
        self.launch(LaunchKind::Exec, options, None::<fn(Option<&LaunchError>, &str, &str)>)
            .await
    }

    /// [`exec`](Self::exec), also notifying `callback` with `(error, stdout, stderr)`.
    pub async fn exec_with<F>(
        &mut self,
        options: Option<&LaunchOptions>,
        callback: F,
    ) -> Result<LaunchOutput, LaunchError>
    where
        F: FnOnce(Option<&LaunchError>, &str, &str),
    {
        self.launch(LaunchKind::Exec, options, Some(callback)).await
    }

    /// Runs the program directly with the remaining tokens as arguments.
    pub async fn spawn(
        &mut self,
        options: Option<&LaunchOptions>,
    ) -> Result<LaunchOutput, LaunchError> {
        self.launch(LaunchKind::Spawn, options, None::<fn(Option<&LaunchError>, &str, &str)>)
            .await
    }

    /// [`spawn`](Self::spawn), also notifying `callback` with `(error, stdout, stderr)`.
    pub async fn spawn_with<F>(
        &mut self,
        options: Option<&LaunchOptions>,
        callback: F,
    ) -> Result<LaunchOutput, LaunchError>
    where
        F: FnOnce(Option<&LaunchError>, &str, &str),
    {
        self.launch(LaunchKind::Spawn, options, Some(callback)).await
    }

    /// Runs the command with the given launch kind.
    pub async fn run(
        &mut self,
        kind: LaunchKind,
        options: Option<&LaunchOptions>,
    ) -> Result<LaunchOutput, LaunchError> {
        self.launch(kind, options, None::<fn(Option<&LaunchError>, &str, &str)>)
            .await
    }

    /// The command string most recently launched with `kind`.
    pub fn last_cmd(&self, kind: LaunchKind) -> Option<&str> {
        match kind {
            LaunchKind::Exec => self.last_exec_cmd.as_deref(),
            LaunchKind::Spawn => self.last_spawn_cmd.as_deref(),
        }
    }

    /// Stdout of the most recent successful launch.
    pub fn last_stdout(&self) -> Option<&str> {
        self.last_stdout.as_deref()
    }

    /// Stderr of the most recent successful launch.
    pub fn last_stderr(&self) -> Option<&str> {
        self.last_stderr.as_deref()
    }

    /// The most recent failure, kept until [`clear_last_outcome`](Self::clear_last_outcome).
    pub fn last_error(&self) -> Option<&LaunchError> {
        self.last_error.as_ref()
    }

    /// Forgets the last stdout, stderr and error. Last command strings are kept.
    pub fn clear_last_outcome(&mut self) -> &mut Self {
        self.last_error = None;
        self.last_stdout = None;
        self.last_stderr = None;
        self
    }

    async fn launch<F>(
        &mut self,
        kind: LaunchKind,
        options: Option<&LaunchOptions>,
        callback: Option<F>,
    ) -> Result<LaunchOutput, LaunchError>
    where
        F: FnOnce(Option<&LaunchError>, &str, &str),
    {
        let rendered = self.to_string();
        debug!("Launching ({}): {}", kind, rendered);
        match kind {
            LaunchKind::Exec => self.last_exec_cmd = Some(rendered.clone()),
            LaunchKind::Spawn => self.last_spawn_cmd = Some(rendered.clone()),
        }

        let launcher = self.launcher.clone();
        let outcome = match kind {
            LaunchKind::Exec => launcher.launch_whole(&rendered, options).await,
            LaunchKind::Spawn => {
                let (program, rest) = self.serialize();
                launcher
                    .launch_split(program.unwrap_or_default(), rest, options)
                    .await
            }
        };

        match &outcome {
            Ok(output) => {
                self.last_stdout = Some(output.stdout.clone());
                self.last_stderr = Some(output.stderr.clone());
            }
            Err(e) => {
                warn!("Launch ({}) of '{}' failed: {}", kind, rendered, e);
                self.last_error = Some(e.clone());
            }
        }

        if let Some(callback) = callback {
            match &outcome {
                Ok(output) => callback(None, &output.stdout, &output.stderr),
                Err(e) => callback(Some(e), "", ""),
            }
        }
        outcome
    }
}
