//! # Ketch Process Launch Layer (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! This module is the boundary between a command builder and the operating
//! system. It defines the launch capability as a trait, `Launcher`, with two
//! operations:
//!
//! - **`launch_whole`**: run a single command string through the host shell,
//!   which performs its own parsing and quoting.
//! - **`launch_split`**: run a program directly with an explicit argument list,
//!   bypassing shell interpretation.
//!
//! Both resolve to a `LaunchOutput` (captured stdout and stderr) or a
//! `LaunchError`.
//!
//! ## Architecture
//!
//! - `LaunchOptions`: per-launch process options (working directory,
//!   environment, shell override, timeout, output decoding). The builder passes
//!   these through untouched; only the launcher interprets them. They also
//!   deserialize from the `[launch]` table of the configuration file.
//! - `SystemLauncher`: the default implementation on top of
//!   `tokio::process::Command`. Output is piped and collected; a non-zero exit
//!   status becomes `LaunchError::Exit` with both streams attached; a configured
//!   timeout kills the child and reports `LaunchError::TimedOut`.
//!
//! Custom launchers (remote runners, recorders, test stubs) implement the same
//! trait and are injected with `Ketch::with_launcher`.
//!
//! ## Usage
//!
//! ```ignore
//! let launcher = SystemLauncher::new();
//! let opts = LaunchOptions { cwd: Some("/tmp".into()), ..Default::default() };
//! let out = launcher.launch_split("ls", &["-la".to_string()], Some(&opts)).await?;
//! println!("{}", out.stdout);
//! ```
//!
use crate::common::system;
use crate::core::error::LaunchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf, process::Stdio, sync::Arc, time::Duration};
use tokio::process::Command;
use tracing::{debug, trace, warn};

/// Captured result of a successful launch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchOutput {
    pub stdout: String,
    pub stderr: String,
}

impl LaunchOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Process options handed to a launcher.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LaunchOptions {
    /// Working directory for the child. Inherited when `None`.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    /// Extra environment variables, applied on top of the inherited environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Start from an empty environment instead of inheriting the parent's.
    #[serde(default)]
    pub clear_env: bool,
    /// Shell used for whole-command launches (default `sh` / `cmd`).
    #[serde(default)]
    pub shell: Option<String>,
    /// Kill the child and fail after this many seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Fail on invalid UTF-8 output instead of replacing it.
    #[serde(default)]
    pub strict_utf8: bool,
}

/// The launch capability consumed by a command builder.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Runs `command` through a shell.
    async fn launch_whole(
        &self,
        command: &str,
        options: Option<&LaunchOptions>,
    ) -> Result<LaunchOutput, LaunchError>;

    /// Runs `program` directly with `args`.
    async fn launch_split(
        &self,
        program: &str,
        args: &[String],
        options: Option<&LaunchOptions>,
    ) -> Result<LaunchOutput, LaunchError>;
}

#[async_trait]
impl<L: Launcher + ?Sized> Launcher for Arc<L> {
    async fn launch_whole(
        &self,
        command: &str,
        options: Option<&LaunchOptions>,
    ) -> Result<LaunchOutput, LaunchError> {
        (**self).launch_whole(command, options).await
    }

    async fn launch_split(
        &self,
        program: &str,
        args: &[String],
        options: Option<&LaunchOptions>,
    ) -> Result<LaunchOutput, LaunchError> {
        (**self).launch_split(program, args, options).await
    }
}

/// Default launcher backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        SystemLauncher
    }
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn launch_whole(
        &self,
        command: &str,
        options: Option<&LaunchOptions>,
    ) -> Result<LaunchOutput, LaunchError> {
        let shell = system::shell_command(options.and_then(|o| o.shell.as_deref()));
        debug!(
            "Launching through shell '{} {}': {}",
            shell.program, shell.flag, command
        );
        let mut cmd = Command::new(&shell.program);
        cmd.arg(shell.flag).arg(command);
        run(cmd, &shell.program, command, options).await
    }

    async fn launch_split(
        &self,
        program: &str,
        args: &[String],
        options: Option<&LaunchOptions>,
    ) -> Result<LaunchOutput, LaunchError> {
        debug!("Launching '{}' with args {:?}", program, args);
        let mut cmd = Command::new(program);
        cmd.args(args);
        let rendered = render(program, args);
        run(cmd, program, &rendered, options).await
    }
}

fn render(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Applies options, runs the child to completion and maps the result.
async fn run(
    mut cmd: Command,
    program: &str,
    rendered: &str,
    options: Option<&LaunchOptions>,
) -> Result<LaunchOutput, LaunchError> {
    let strict = options.is_some_and(|o| o.strict_utf8);
    let timeout = options.and_then(|o| o.timeout_secs);

    if let Some(opts) = options {
        apply_options(&mut cmd, opts);
    }
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|e| LaunchError::Spawn {
        program: program.to_string(),
        source: Arc::new(e),
    })?;

    let waited = match timeout {
        Some(secs) => {
            match tokio::time::timeout(Duration::from_secs(secs), child.wait_with_output()).await {
                Ok(waited) => waited,
                Err(_) => {
                    // Dropping the future drops the child, and kill_on_drop reaps it.
                    warn!("'{}' exceeded {}s, killed", rendered, secs);
                    return Err(LaunchError::TimedOut {
                        command: rendered.to_string(),
                        secs,
                    });
                }
            }
        }
        None => child.wait_with_output().await,
    };
    let output = waited.map_err(|e| LaunchError::Io {
        command: rendered.to_string(),
        source: Arc::new(e),
    })?;

    let stdout = decode(output.stdout, strict, rendered, "stdout")?;
    let stderr = decode(output.stderr, strict, rendered, "stderr")?;
    trace!(
        "'{}' finished: status={}, stdout={} bytes, stderr={} bytes",
        rendered,
        output.status,
        stdout.len(),
        stderr.len()
    );

    if !output.status.success() {
        return Err(LaunchError::Exit {
            command: rendered.to_string(),
            code: output.status.code(),
            stdout,
            stderr,
        });
    }
    Ok(LaunchOutput { stdout, stderr })
}

fn apply_options(cmd: &mut Command, opts: &LaunchOptions) {
    if let Some(dir) = &opts.cwd {
        cmd.current_dir(dir);
    }
    if opts.clear_env {
        cmd.env_clear();
    }
    cmd.envs(&opts.env);
}

fn decode(
    bytes: Vec<u8>,
    strict: bool,
    command: &str,
    stream: &'static str,
) -> Result<String, LaunchError> {
    if strict {
        String::from_utf8(bytes).map_err(|_| LaunchError::Encoding {
            command: command.to_string(),
            stream,
        })
    } else {
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_from_toml() {
        let opts: LaunchOptions = toml::from_str(
            r#"
            cwd = "/tmp"
            timeout_secs = 5
            [env]
            FOO = "bar"
            "#,
        )
        .unwrap();
        assert_eq!(opts.cwd, Some(PathBuf::from("/tmp")));
        assert_eq!(opts.timeout_secs, Some(5));
        assert_eq!(opts.env.get("FOO").map(String::as_str), Some("bar"));
        assert!(!opts.clear_env);
        assert!(!opts.strict_utf8);
        assert_eq!(opts.shell, None);
    }

    #[test]
    fn test_launch_options_reject_unknown_fields() {
        let parsed: Result<LaunchOptions, _> = toml::from_str("encoding = \"latin1\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_decode_lossy_and_strict() {
        let bad = vec![0x66, 0x6f, 0xff];
        assert_eq!(decode(bad.clone(), false, "x", "stdout").unwrap(), "fo\u{fffd}");
        let err = decode(bad, true, "x", "stdout").unwrap_err();
        assert!(matches!(err, LaunchError::Encoding { stream: "stdout", .. }));
    }

    #[test]
    fn test_render_joins_program_and_args() {
        assert_eq!(render("git", &["status".into(), "-s".into()]), "git status -s");
        assert_eq!(render("ls", &[]), "ls");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_split_captures_stdout() {
        let out = SystemLauncher::new()
            .launch_split("echo", &["hello".into()], None)
            .await
            .unwrap();
        assert_eq!(out.stdout, "hello\n");
        assert_eq!(out.stderr, "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_whole_uses_shell() {
        let out = SystemLauncher::new()
            .launch_whole("echo out; echo err 1>&2", None)
            .await
            .unwrap();
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_reported() {
        let err = SystemLauncher::new()
            .launch_whole("echo partial; exit 3", None)
            .await
            .unwrap_err();
        match err {
            LaunchError::Exit {
                code, stdout, command, ..
            } => {
                assert_eq!(code, Some(3));
                assert_eq!(stdout, "partial\n");
                assert_eq!(command, "echo partial; exit 3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = SystemLauncher::new()
            .launch_split("ketch-definitely-not-a-program", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_options_cwd_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = BTreeMap::new();
        env.insert("KETCH_TEST_VAR".to_string(), "marker".to_string());
        let opts = LaunchOptions {
            cwd: Some(dir.path().to_path_buf()),
            env,
            ..Default::default()
        };
        let out = SystemLauncher::new()
            .launch_whole("pwd; echo $KETCH_TEST_VAR", Some(&opts))
            .await
            .unwrap();
        let mut lines = out.stdout.lines();
        let pwd = lines.next().unwrap();
        assert_eq!(
            std::fs::canonicalize(pwd).unwrap(),
            std::fs::canonicalize(dir.path()).unwrap()
        );
        assert_eq!(lines.next(), Some("marker"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_child() {
        let opts = LaunchOptions {
            timeout_secs: Some(1),
            ..Default::default()
        };
        let err = SystemLauncher::new()
            .launch_split("sleep", &["5".into()], Some(&opts))
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchError::TimedOut { secs: 1, .. }));
    }
}
