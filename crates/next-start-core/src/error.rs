//! Error taxonomy shared by the step driver and the binary

use std::io;
use thiserror::Error;

/// Errors that cross a step boundary and reach the orchestrator
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The user pressed Ctrl+C or dismissed a prompt
    #[error("Operation cancelled by user")]
    Cancelled,

    /// A fatal step failed; the project directory is left as-is
    #[error("{step} failed: {cause:#}")]
    StepFailed {
        step: &'static str,
        cause: anyhow::Error,
    },
}

impl ScaffoldError {
    /// Classify an error raised outside a step (prompts, preflight)
    pub fn during(stage: &'static str, err: anyhow::Error) -> Self {
        if is_cancelled(&err) {
            ScaffoldError::Cancelled
        } else {
            ScaffoldError::StepFailed { step: stage, cause: err }
        }
    }

    /// Process exit code for this error (cancellation is a clean exit)
    pub fn exit_code(&self) -> u8 {
        match self {
            ScaffoldError::Cancelled => 0,
            ScaffoldError::StepFailed { .. } => 1,
        }
    }
}

/// Failure of an external command
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {}{}", describe_exit(.code), stderr_tail(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

const STDERR_TAIL_LINES: usize = 5;

/// Last non-blank stderr lines, or nothing
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return String::new();
    }
    let tail = &lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..];
    format!(":\n{}", tail.join("\n"))
}

/// Whether an error chain represents a user cancellation.
///
/// cliclack reports Ctrl+C / Esc on a prompt as `io::ErrorKind::Interrupted`.
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(scaffold) = cause.downcast_ref::<ScaffoldError>() {
            return matches!(scaffold, ScaffoldError::Cancelled);
        }
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::Interrupted)
    })
}
