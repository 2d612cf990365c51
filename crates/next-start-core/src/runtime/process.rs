//! External command execution
//!
//! Every generator, installer and git call goes through [`ProcessRunner`].
//! Interactive tools (shadcn init, create-next-app) inherit the terminal;
//! everything else has its output captured.

use crate::error::ProcessError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// How a child process talks to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Child reads and writes the user's terminal directly
    Inherit,
    /// stdout/stderr are collected and returned
    Capture,
}

/// A fixed command line plus where to run it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub mode: OutputMode,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            mode: OutputMode::Capture,
        }
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn inherit(mut self) -> Self {
        self.mode = OutputMode::Inherit;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs invocations to completion, one at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run to completion. A non-zero exit status is an error.
    pub async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError> {
        let command_line = invocation.to_string();
        debug!(command = %command_line, cwd = ?invocation.cwd, "running");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }

        match invocation.mode {
            OutputMode::Inherit => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await
                    .map_err(|source| ProcessError::Spawn {
                        command: command_line.clone(),
                        source,
                    })?;

                if !status.success() {
                    return Err(ProcessError::Failed {
                        command: command_line,
                        code: status.code(),
                        stderr: String::new(),
                    });
                }
                Ok(ProcessOutput::default())
            }
            OutputMode::Capture => {
                let output = command
                    .stdin(Stdio::null())
                    .output()
                    .await
                    .map_err(|source| ProcessError::Spawn {
                        command: command_line.clone(),
                        source,
                    })?;

                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

                if !output.status.success() {
                    return Err(ProcessError::Failed {
                        command: command_line,
                        code: output.status.code(),
                        stderr,
                    });
                }
                Ok(ProcessOutput { stdout, stderr })
            }
        }
    }
}
