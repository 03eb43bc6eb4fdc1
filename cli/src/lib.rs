//! # Ketch
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! Ketch builds command lines with chainable mutations and then executes them,
//! one way or another:
//!
//! - through a shell, as one string (`exec`), or
//! - directly, as a program plus argument list (`spawn`).
//!
//! Results arrive as a future of `LaunchOutput` (stdout and stderr), optionally
//! mirrored to a node-style callback. The launch itself is delegated to a
//! `Launcher`; `SystemLauncher` runs real processes via `tokio::process`, and
//! any other implementation can be injected with `Ketch::with_launcher`.
//!
//! ## Architecture
//!
//! - `builder`: the `Ketch` type, input normalization and the execution adapter
//! - `common`: the launch capability and host helpers
//! - `core`: error types and configuration
//!
//! ## Examples
//!
//! ```no_run
//! use ketch::ketch;
//!
//! # async fn branch() -> Result<(), ketch::LaunchError> {
//! let mut cmd = ketch("git");
//! cmd.prepend("/usr/bin/env")
//!     .push("symbolic-ref")
//!     .opt(["quiet", "short"])
//!     .push("HEAD");
//!
//! let output = cmd
//!     .spawn_with(None, |err, stdout, _stderr| {
//!         if err.is_none() {
//!             println!("on branch {}", stdout.trim());
//!         }
//!     })
//!     .await?;
//! assert_eq!(cmd.last_stdout(), Some(output.stdout.as_str()));
//! # Ok(())
//! # }
//! ```
//!
pub mod builder;
pub mod common;
pub mod core;

pub use crate::builder::args::{parse_args, parse_variadic, IntoTokens};
pub use crate::builder::exec::LaunchKind;
pub use crate::builder::{ketch, Ketch};
pub use crate::common::process::{LaunchOptions, LaunchOutput, Launcher, SystemLauncher};
pub use crate::core::error::{KetchError, LaunchError};
