//! Running external commands
//!
//! [`ProcessRunner`] captures both output streams of the child concurrently
//! (so a chatty build cannot block on a full pipe) and kills the child when
//! the timeout expires.
//!
//! Programs are resolved on `PATH` before spawning, so a Windows Maven
//! installed as `mvn.cmd` is found by its bare name. The standard library
//! runs a resolved `.cmd`/`.bat` file through `cmd.exe` with its own argument
//! escaping.

use super::command::MavenCommand;
use async_trait::async_trait;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start process: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("process timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion, capturing stdout and stderr
    async fn capture(&self, command: &MavenCommand, timeout: Duration) -> Result<CommandOutput, RunError>;

    /// Run with inherited stdio, returning the exit code
    async fn run_inherited(&self, command: &MavenCommand) -> Result<Option<i32>, RunError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(command: &MavenCommand) -> Command {
        let program = resolve_program(command.program());
        debug!(program = %program.display(), "Resolved program");
        let mut cmd = Command::new(program);
        cmd.args(command.args());
        cmd
    }
}

/// Full path of `program` as found on `PATH` (honouring `PATHEXT` on Windows).
///
/// An unresolvable name is returned unchanged so that spawning reports the
/// failure.
pub fn resolve_program(program: &str) -> PathBuf {
    let paths = env::var_os("PATH");
    match env::current_dir() {
        Ok(cwd) => resolve_program_in(program, paths.as_deref(), &cwd),
        Err(_) => PathBuf::from(program),
    }
}

fn resolve_program_in(program: &str, paths: Option<&OsStr>, cwd: &Path) -> PathBuf {
    which::which_in(program, paths, cwd).unwrap_or_else(|_| PathBuf::from(program))
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn capture(&self, command: &MavenCommand, timeout: Duration) -> Result<CommandOutput, RunError> {
        debug!(command = %command, timeout_secs = timeout.as_secs(), "Spawning process");

        let child = Self::command(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Dropping the wait future on timeout drops the child, which kills it
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(command = %command, timeout_secs = timeout.as_secs(), "Process timed out, killed");
                return Err(RunError::Timeout(timeout));
            }
        };

        let output = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            exit_code = ?output.exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "Process finished"
        );
        Ok(output)
    }

    async fn run_inherited(&self, command: &MavenCommand) -> Result<Option<i32>, RunError> {
        debug!(command = %command, "Spawning process with inherited stdio");

        let status = Self::command(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        Ok(status.code())
    }
}
