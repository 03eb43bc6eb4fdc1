//! # Ketch Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads the default launch options used by the `ketch` binary. Library users
//! pass `LaunchOptions` explicitly and never touch this module.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.ketch.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/ketch/config.toml`)
//! 3. Defaults (no cwd override, inherited environment, platform shell)
//!
//! After merging, `~` in `launch.cwd` is expanded and the result is validated.
//!
//! ## Examples
//!
//! ```toml
//! [launch]
//! cwd = "~/code"
//! shell = "bash"
//! timeout_secs = 30
//!
//! [launch.env]
//! GIT_PAGER = "cat"
//! ```
//!
use crate::common::process::LaunchOptions;
use crate::core::error::{KetchError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Top-level configuration file structure.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default options for every launch made by the binary.
    #[serde(default)]
    pub launch: LaunchOptions,
}

const PROJECT_CONFIG_FILENAME: &str = ".ketch.toml";

/// Loads, merges, expands and validates the configuration.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    finalize(merge_configs(user_config.unwrap_or_default(), project_config))
}

/// Loads a single explicit file instead of searching (used by `--config`).
pub fn load_config_file(path: &Path) -> Result<Config> {
    info!("Loading configuration from: {}", path.display());
    finalize(load_config_from_path(path)?)
}

fn finalize(mut config: Config) -> Result<Config> {
    expand_config_paths(&mut config).context("Failed to expand paths in configuration")?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Ketch", "ketch") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No project configuration file (.ketch.toml) found in current directory or ancestors.");
            Ok(None)
        }
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win field by field; env maps are merged with project keys on top.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let (user, project) = (user.launch, project.launch);
    let mut env = user.env;
    env.extend(project.env);
    Config {
        launch: LaunchOptions {
            cwd: project.cwd.or(user.cwd),
            env,
            clear_env: project.clear_env || user.clear_env,
            shell: project.shell.or(user.shell),
            timeout_secs: project.timeout_secs.or(user.timeout_secs),
            strict_utf8: project.strict_utf8 || user.strict_utf8,
        },
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(cwd) = &config.launch.cwd {
        let expanded = shellexpand::tilde(&cwd.to_string_lossy()).into_owned();
        debug!("Expanded launch cwd: {}", expanded);
        config.launch.cwd = Some(PathBuf::from(expanded));
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    let launch = &config.launch;
    if let Some(cwd) = &launch.cwd {
        if !cwd.is_dir() {
            return Err(anyhow!(KetchError::Config(format!(
                "Configured launch cwd '{}' does not exist or is not a directory.",
                cwd.display()
            ))));
        }
    }
    for key in launch.env.keys() {
        if key.is_empty() || key.contains('=') {
            return Err(anyhow!(KetchError::Config(format!(
                "Invalid environment variable name: '{}'.",
                key
            ))));
        }
    }
    if launch.timeout_secs == Some(0) {
        return Err(anyhow!(KetchError::Config(
            "launch.timeout_secs must be greater than zero.".to_string()
        )));
    }
    debug!("Configuration validation successful.");
    Ok(())
}
