//! # Ketch Command Builder (`builder`)
//!
//! File: cli/src/builder/mod.rs
//!
//! ## Overview
//!
//! `Ketch` holds an ordered list of string tokens describing one command line:
//! the first token is the program, the rest are its arguments. Tokens are added
//! and removed with chainable mutators and the finished command is rendered in
//! one of two forms:
//!
//! - **`to_string()`**: all tokens joined by single spaces, for shell-style
//!   launches.
//! - **`serialize()`**: a `(program, args)` pair, for direct launches.
//!
//! Execution (`exec`, `spawn` and their callback variants) lives in the `exec`
//! submodule.
//!
//! ## Architecture
//!
//! - `args`: input normalization shared by every mutator (`IntoTokens`).
//! - `exec`: launch kinds and the execution adapter.
//! - This module: the `Ketch` type, its mutators, renderers and aliases.
//!
//! Inputs are copied on the way in, so a builder never aliases caller data.
//!
//! ## Examples
//!
//! ```ignore
//! use ketch::ketch;
//!
//! // what branch am I on?
//! let mut cmd = ketch("git");
//! cmd.prepend("/usr/bin/env")
//!     .push("symbolic-ref")
//!     .opt(["quiet", "short"])
//!     .push("HEAD");
//! assert_eq!(cmd.to_string(), "/usr/bin/env git symbolic-ref --quiet --short HEAD");
//!
//! let output = cmd.spawn(None).await?;
//! println!("{}", output.stdout.trim());
//! ```
//!
pub mod args;
pub mod exec;

use crate::common::process::{Launcher, SystemLauncher};
use crate::core::error::LaunchError;
use args::IntoTokens;
use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::{
    fmt,
    io::{self, Write},
    sync::Arc,
};
use tracing::trace;

/// Chainable builder for an external command.
#[derive(Clone)]
pub struct Ketch {
    tokens: Vec<String>,
    launcher: Arc<dyn Launcher>,
    last_error: Option<LaunchError>,
    last_stdout: Option<String>,
    last_stderr: Option<String>,
    last_exec_cmd: Option<String>,
    last_spawn_cmd: Option<String>,
}

/// Creates a new builder from `input` using the system launcher.
///
/// Equivalent to [`Ketch::new`].
pub fn ketch<I: IntoTokens>(input: I) -> Ketch {
    Ketch::new(input)
}

impl Ketch {
    /// Creates a builder whose commands run through [`SystemLauncher`].
    pub fn new<I: IntoTokens>(input: I) -> Self {
        Self::with_launcher(input, SystemLauncher::new())
    }

    /// Creates a builder that runs its commands through `launcher`.
    pub fn with_launcher<I, L>(input: I, launcher: L) -> Self
    where
        I: IntoTokens,
        L: Launcher + 'static,
    {
        let tokens = args::parse_args(input);
        trace!("New command: {:?}", tokens);
        Ketch {
            tokens,
            launcher: Arc::new(launcher),
            last_error: None,
            last_stdout: None,
            last_stderr: None,
            last_exec_cmd: None,
            last_spawn_cmd: None,
        }
    }

    /// Swaps the launcher used by later executions.
    pub fn set_launcher<L: Launcher + 'static>(&mut self, launcher: L) -> &mut Self {
        self.launcher = Arc::new(launcher);
        self
    }

    /// The current tokens, program first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Direct access to the token list, e.g. to take a value `pop()` discards.
    pub fn tokens_mut(&mut self) -> &mut Vec<String> {
        &mut self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Appends tokens to the end of the command.
    pub fn append<I: IntoTokens>(&mut self, input: I) -> &mut Self {
        self.tokens.extend(args::parse_args(input));
        self
    }

    /// Alias of [`append`](Self::append).
    pub fn push<I: IntoTokens>(&mut self, input: I) -> &mut Self {
        self.append(input)
    }

    /// Inserts tokens in front of the command, keeping their order.
    pub fn prepend<I: IntoTokens>(&mut self, input: I) -> &mut Self {
        let mut front = args::parse_args(input);
        front.append(&mut self.tokens);
        self.tokens = front;
        self
    }

    /// Alias of [`prepend`](Self::prepend).
    pub fn unshift<I: IntoTokens>(&mut self, input: I) -> &mut Self {
        self.prepend(input)
    }

    /// Appends options: `opt(["q", "short"])` adds `-q --short`.
    pub fn opt<I: IntoTokens>(&mut self, input: I) -> &mut Self {
        let flags: Vec<String> = args::parse_args(input)
            .iter()
            .map(|name| args::to_flag(name))
            .collect();
        self.append(flags)
    }

    /// Alias of [`opt`](Self::opt).
    pub fn option<I: IntoTokens>(&mut self, input: I) -> &mut Self {
        self.opt(input)
    }

    /// Drops the last token. Does not return it; see [`tokens_mut`](Self::tokens_mut).
    pub fn pop(&mut self) -> &mut Self {
        self.tokens.pop();
        self
    }

    /// Drops the first token. Does not return it; see [`tokens_mut`](Self::tokens_mut).
    pub fn shift(&mut self) -> &mut Self {
        if !self.tokens.is_empty() {
            self.tokens.remove(0);
        }
        self
    }

    /// Removes `delete_count` tokens at `start` and inserts `items` there.
    ///
    /// A negative `start` counts back from the end. Out-of-range values are
    /// clamped, so this never panics. Inserted items are not split.
    pub fn splice<I, S>(&mut self, start: isize, delete_count: usize, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let len = self.tokens.len();
        let start = if start < 0 {
            len.saturating_sub(start.unsigned_abs())
        } else {
            (start as usize).min(len)
        };
        let end = start + delete_count.min(len - start);
        self.tokens
            .splice(start..end, items.into_iter().map(Into::into));
        self
    }

    /// Returns `(program, args)`. The program is `None` for an empty command.
    pub fn serialize(&self) -> (Option<&str>, &[String]) {
        match self.tokens.split_first() {
            Some((program, rest)) => (Some(program.as_str()), rest),
            None => (None, &[]),
        }
    }

    /// Alias of [`serialize`](Self::serialize).
    pub fn get(&self) -> (Option<&str>, &[String]) {
        self.serialize()
    }

    /// The serialized pair as JSON: `["program", ["arg", ...]]`.
    pub fn to_json(&self) -> serde_json::Value {
        let (program, rest) = self.serialize();
        serde_json::json!([program, rest])
    }

    /// Empties the command.
    pub fn clear(&mut self) -> &mut Self {
        self.tokens.clear();
        self
    }

    /// Alias of [`clear`](Self::clear).
    pub fn reset(&mut self) -> &mut Self {
        self.clear()
    }

    /// Writes the rendered command to stderr.
    pub fn debug(&mut self) -> &mut Self {
        // A closed stderr is not worth failing a chain over.
        let _ = self.write_rendered(&mut io::stderr().lock());
        self
    }

    /// Writes the rendered command and a newline to `out`.
    pub fn debug_to<W: Write>(&mut self, out: &mut W) -> io::Result<&mut Self> {
        self.write_rendered(out)?;
        Ok(self)
    }

    fn write_rendered<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self)
    }

    /// Calls `f` with the builder, for side effects inside a chain.
    pub fn tap<F: FnOnce(&Ketch)>(&mut self, f: F) -> &mut Self {
        f(self);
        self
    }
}

impl Default for Ketch {
    fn default() -> Self {
        Ketch::new(())
    }
}

impl fmt::Display for Ketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl fmt::Debug for Ketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ketch")
            .field("tokens", &self.tokens)
            .field("last_error", &self.last_error)
            .field("last_stdout", &self.last_stdout)
            .field("last_stderr", &self.last_stderr)
            .field("last_exec_cmd", &self.last_exec_cmd)
            .field("last_spawn_cmd", &self.last_spawn_cmd)
            .finish_non_exhaustive()
    }
}

impl Serialize for Ketch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (program, rest) = Ketch::serialize(self);
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&program)?;
        pair.serialize_element(rest)?;
        pair.end()
    }
}
