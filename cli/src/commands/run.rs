//! # Ketch Run Command
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `ketch run`: build a command, execute it, and relay its captured
//! stdout and stderr.
//!
//! ## Architecture
//!
//! 1. Load configuration (`--config FILE`, or the user/project search) to get
//!    default `LaunchOptions`.
//! 2. Apply command-line overrides (`--cwd`, `--env`, `--timeout`, `--strict-utf8`).
//! 3. Build the command from `BuildArgs`; `--debug` prints it to stderr first.
//! 4. Launch with `spawn` (default, no shell) or `exec` (`--shell`).
//! 5. Print captured output. A failed launch returns `KetchError::Launch`, so
//!    `main` can mirror the child's exit code.
//!
//! ## Usage
//!
//! ```bash
//! ketch run git status -s
//! ketch run --shell "ls | wc -l"
//! ketch run -C ~/code -e GIT_PAGER=cat --timeout 10 git log -1
//! ```
//!
use super::BuildArgs;
use anyhow::{anyhow, Context};
use clap::Parser;
use ketch::{
    core::{
        config,
        error::{KetchError, Result},
    },
    LaunchError, LaunchKind, LaunchOptions,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// Arguments for `ketch run`.
#[derive(Parser, Debug)]
#[command(
    about = "Build and execute a command",
    long_about = "Builds a command from the given tokens and executes it, directly by default or through a shell with --shell."
)]
pub struct RunArgs {
    /// Run the rendered command string through a shell instead of executing the program directly.
    #[arg(long)]
    shell: bool,

    /// Working directory for the command (overrides the configured one).
    #[arg(short = 'C', long = "cwd", value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Extra environment variable for the command (repeatable).
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
    env: Vec<String>,

    /// Kill the command after this many seconds.
    #[arg(long = "timeout", value_name = "SECS")]
    timeout: Option<u64>,

    /// Fail when the command writes invalid UTF-8.
    #[arg(long)]
    strict_utf8: bool,

    /// Print the built command to stderr before running it.
    #[arg(long)]
    debug: bool,

    /// Read launch defaults from this file instead of searching for one.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    build: BuildArgs,
}

/// Handler for `ketch run`.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    info!("Handling run command...");
    debug!("Run args: {:?}", args);

    let cfg = match &args.config {
        Some(path) => config::load_config_file(path),
        None => config::load_config(),
    }
    .context("Failed to load Ketch configuration")?;
    let options = launch_options(&args, cfg.launch)?;

    let mut cmd = args.build.build();
    if args.debug {
        cmd.debug();
    }

    let kind = if args.shell {
        LaunchKind::Exec
    } else {
        LaunchKind::Spawn
    };
    match cmd.run(kind, Some(&options)).await {
        Ok(output) => {
            print!("{}", output.stdout);
            eprint!("{}", output.stderr);
            Ok(())
        }
        Err(e) => {
            if let LaunchError::Exit { stdout, stderr, .. } = &e {
                print!("{}", stdout);
                eprint!("{}", stderr);
            }
            Err(anyhow!(KetchError::from(e)))
        }
    }
}

/// Layers command-line overrides on top of the configured defaults.
fn launch_options(args: &RunArgs, mut options: LaunchOptions) -> Result<LaunchOptions> {
    if let Some(cwd) = &args.cwd {
        options.cwd = Some(cwd.clone());
    }
    for pair in &args.env {
        let (key, value) = parse_env_pair(pair)?;
        options.env.insert(key, value);
    }
    if let Some(secs) = args.timeout {
        if secs == 0 {
            return Err(anyhow!(KetchError::ArgumentParsing(
                "--timeout must be greater than zero".to_string()
            )));
        }
        options.timeout_secs = Some(secs);
    }
    options.strict_utf8 |= args.strict_utf8;
    Ok(options)
}

fn parse_env_pair(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(anyhow!(KetchError::ArgumentParsing(format!(
            "Invalid --env value '{}'. Expected KEY=VALUE.",
            pair
        )))),
    }
}
