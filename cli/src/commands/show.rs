//! # Ketch Show Command
//!
//! File: cli/src/commands/show.rs
//!
//! ## Overview
//!
//! Implements `ketch show`: build a command and print it without running it.
//!
//! ```bash
//! ketch show git status -s          # git status -s
//! ketch show --json "git status -s" # ["git",["status","-s"]]
//! ```
//!
use super::BuildArgs;
use anyhow::Context;
use clap::Parser;
use ketch::core::error::Result;
use tracing::info;

/// Arguments for `ketch show`.
#[derive(Parser, Debug)]
#[command(about = "Print a built command without running it")]
pub struct ShowArgs {
    /// Print the serialized `[program, [args...]]` pair as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    build: BuildArgs,
}

/// Handler for `ketch show`.
pub async fn handle_show(args: ShowArgs) -> Result<()> {
    info!("Handling show command...");
    println!("{}", render(&args)?);
    Ok(())
}

fn render(args: &ShowArgs) -> Result<String> {
    let cmd = args.build.build();
    if args.json {
        serde_json::to_string(&cmd).context("Failed to serialize command")
    } else {
        Ok(cmd.to_string())
    }
}
