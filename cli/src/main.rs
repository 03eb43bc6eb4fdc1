//! # Ketch Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the `ketch` binary, a thin command-line front end over the
//! `ketch` library. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the subcommand handlers
//! - Mapping failures to a process exit code
//!
//! ## Examples
//!
//! ```bash
//! # Show how a command renders
//! ketch show -p /usr/bin/env -o quiet -o short git symbolic-ref HEAD
//!
//! # Run it, logging the launch
//! ketch -v run -p /usr/bin/env -o quiet -o short git symbolic-ref HEAD
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (or `RUST_LOG`)
//! 3. Route to the subcommand handler
//! 4. On error, log it, print it, and exit with the child's exit code when
//!    there is one, `1` otherwise
//!
use clap::{Parser, Subcommand};
use ketch::{KetchError, LaunchError};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "ketch",
    about = "Build command lines, then execute them one way or another",
    long_about = "Assemble a command from tokens, prepended tokens and option names,\n\
                  then print it or run it directly or through a shell.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(alias = "s")]
    Show(commands::show::ShowArgs),
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Show(args) => commands::show::handle_show(args).await,
        Commands::Run(args) => commands::run::handle_run(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

/// The child's exit code for a non-zero exit, `1` for everything else.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<KetchError>() {
        Some(KetchError::Launch {
            source: LaunchError::Exit {
                code: Some(code), ..
            },
        }) if *code != 0 => *code,
        _ => 1,
    }
}
