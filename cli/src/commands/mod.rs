//! # Ketch Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Subcommands of the `ketch` binary. Both build a `Ketch` from the same
//! arguments (`BuildArgs`) and differ in what they do with it:
//!
//! - `show`: print the rendered command (or its serialized JSON pair)
//! - `run`: execute it and relay the captured output
//!
//! ## Building
//!
//! Trailing tokens are normalized like any builder input: several tokens are
//! kept as given, a single token is split on spaces. Then `--prepend` tokens go
//! in front and `--opt` names are appended as flags, so
//! `ketch show -p env -o quiet git status` renders `env git status --quiet`.
//!
use clap::Args;
use ketch::{parse_variadic, Ketch};
use tracing::debug;

/// Command for running a built command line.
pub mod run;
/// Command for rendering a built command line.
pub mod show;

/// Arguments shared by every subcommand that builds a command.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Token to put in front of the command (repeatable, kept in order).
    #[arg(short = 'p', long = "prepend", value_name = "TOKEN")]
    pub prepend: Vec<String>,

    /// Option to append: one-letter names become `-x`, longer ones `--name` (repeatable).
    #[arg(short = 'o', long = "opt", value_name = "NAME")]
    pub opts: Vec<String>,

    /// The command. A single argument is split on spaces.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

impl BuildArgs {
    /// Builds the `Ketch` these arguments describe.
    pub fn build(&self) -> Ketch {
        let mut cmd = Ketch::new(parse_variadic(&self.command));
        if !self.prepend.is_empty() {
            cmd.prepend(&self.prepend);
        }
        if !self.opts.is_empty() {
            cmd.opt(&self.opts);
        }
        debug!("Built command: {:?}", cmd.tokens());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        build: BuildArgs,
    }

    fn build(argv: &[&str]) -> String {
        Harness::try_parse_from(argv).unwrap().build.build().to_string()
    }

    #[test]
    fn test_single_argument_is_split() {
        assert_eq!(build(&["h", "git status"]), "git status");
    }

    #[test]
    fn test_many_arguments_are_kept() {
        assert_eq!(build(&["h", "echo", "a b"]), "echo a b");
        let parsed = Harness::try_parse_from(["h", "echo", "a b"]).unwrap();
        assert_eq!(parsed.build.build().tokens(), ["echo", "a b"]);
    }

    #[test]
    fn test_prepend_and_opts() {
        assert_eq!(
            build(&["h", "-p", "/usr/bin/env", "-o", "quiet", "-o", "s", "git", "symbolic-ref"]),
            "/usr/bin/env git symbolic-ref --quiet -s"
        );
    }

    #[test]
    fn test_hyphen_values_after_command() {
        assert_eq!(build(&["h", "ls", "-la", "--color=never"]), "ls -la --color=never");
    }

    #[test]
    fn test_command_is_required() {
        assert!(Harness::try_parse_from(["h"]).is_err());
    }
}
