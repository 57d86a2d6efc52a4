use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::process::Command;

/// Keep error messages readable when a tool dumps a lot of diagnostics
const MAX_STDERR_CHARS: usize = 2048;

/// Failure running an external tool
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The program could not be started or awaited
    #[error("failed to run `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The program did not exit in time and was killed
    #[error("`{command}` did not finish within {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
}

impl ToolError {
    /// Command line of the failing invocation
    pub fn command(&self) -> &str {
        match self {
            Self::Io { command, .. } | Self::Failed { command, .. } | Self::TimedOut { command, .. } => command,
        }
    }
}

/// Runs programs directly (no shell) and waits for them to exit
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `program` with `args`, returning captured stdout on exit code 0
    ///
    /// The child is killed when the timeout elapses or when the returned
    /// future is dropped before completion.
    pub async fn run<S>(&self, program: &Path, args: &[S]) -> Result<Vec<u8>, ToolError>
    where
        S: AsRef<OsStr>,
    {
        let command_line = render_command(program, args);
        let start = Instant::now();

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ToolError::Io {
                command: command_line.clone(),
                source,
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| ToolError::Io {
                command: command_line.clone(),
                source,
            })?,
            Err(_) => {
                tracing::warn!(command = %command_line, timeout = ?self.timeout, "tool timed out, killing");
                return Err(ToolError::TimedOut {
                    command: command_line,
                    timeout: self.timeout,
                });
            }
        };

        tracing::debug!(
            command = %command_line,
            status = %output.status,
            elapsed_ms = start.elapsed().as_millis(),
            "tool finished"
        );

        if !output.status.success() {
            return Err(ToolError::Failed {
                command: command_line,
                status: output.status,
                stderr: truncate_diagnostics(&output.stderr),
            });
        }

        Ok(output.stdout)
    }
}

fn render_command<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

fn truncate_diagnostics(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();

    if text.chars().count() <= MAX_STDERR_CHARS {
        return text.to_owned();
    }

    let mut truncated: String = text.chars().take(MAX_STDERR_CHARS).collect();
    truncated.push_str("...");
    truncated
}
