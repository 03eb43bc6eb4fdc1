//! # Ketch System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host-level helpers used by the launch layer. Currently this is shell
//! selection for whole-command launches: a rendered command string is handed
//! to a shell, which does its own parsing and quoting.
//!
//! - Unix: `sh -c <command>`
//! - Windows: `cmd /C <command>`
//!
//! A shell configured in `LaunchOptions::shell` replaces the platform default.
//! `cmd`-style shells (`cmd`, `cmd.exe`) take `/C`; everything else (`bash`,
//! `zsh`, `pwsh` and friends) takes `-c`.
//!

/// Shell program and the flag that makes it run a command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub flag: &'static str,
}

/// Returns the platform default shell invocation.
pub fn default_shell() -> ShellCommand {
    if cfg!(windows) {
        ShellCommand {
            program: "cmd".to_string(),
            flag: "/C",
        }
    } else {
        ShellCommand {
            program: "sh".to_string(),
            flag: "-c",
        }
    }
}

/// Resolves the shell to use, honoring an explicit override.
pub fn shell_command(shell: Option<&str>) -> ShellCommand {
    match shell.map(str::trim).filter(|s| !s.is_empty()) {
        Some(program) => ShellCommand {
            program: program.to_string(),
            flag: flag_for(program),
        },
        None => default_shell(),
    }
}

fn flag_for(program: &str) -> &'static str {
    let name = std::path::Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program)
        .to_ascii_lowercase();
    match name.as_str() {
        "cmd" | "cmd.exe" => "/C",
        _ => "-c",
    }
}
