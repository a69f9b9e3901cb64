//! Blocking execution of external programs
//!
//! Every call waits for the child to exit; its exit code becomes the
//! command's status.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use which::which;

use crate::core::{SiteError, SiteResult};
use crate::orchestration::ExitStatus;

/// Runs shell lines and programs from a fixed working directory
pub struct ProcessRunner {
    /// Working directory
    working_dir: PathBuf,
    /// Extra environment variables
    env: HashMap<String, String>,
}

impl ProcessRunner {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            env: HashMap::new(),
        }
    }

    /// Set one environment variable for spawned processes
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Run a command line through the platform shell with inherited stdio
    pub fn run_shell(&self, line: &str) -> SiteResult<ExitStatus> {
        let (shell, shell_arg) = if cfg!(windows) {
            ("cmd.exe", "/c")
        } else {
            ("sh", "-c")
        };

        tracing::debug!(shell, cwd = %self.working_dir.display(), "Running shell line");

        let status = Command::new(shell)
            .arg(shell_arg)
            .arg(line)
            .current_dir(&self.working_dir)
            .envs(&self.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| SiteError::spawn(shell, e))?;

        Ok(exit_code(status))
    }

    /// Run a program with arguments and inherited stdio
    ///
    /// The program is looked up on `PATH` first so a missing client is
    /// reported as such instead of as a generic spawn failure.
    pub fn run_program(&self, program: &str, args: &[String]) -> SiteResult<ExitStatus> {
        let path = which(program).map_err(|e| SiteError::spawn(program, e))?;

        tracing::debug!(program = %path.display(), args = args.len(), "Running program");

        let status = Command::new(&path)
            .args(args)
            .current_dir(&self.working_dir)
            .envs(&self.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| SiteError::spawn(program, e))?;

        Ok(exit_code(status))
    }
}

/// Exit code of a finished child; termination by signal counts as 1
fn exit_code(status: std::process::ExitStatus) -> ExitStatus {
    match status.code() {
        Some(code) => code,
        None => {
            tracing::warn!("Child process terminated by signal");
            1
        }
    }
}

/// Quote a value for safe interpolation into a POSIX shell line
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@%+,".contains(c));

    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
