//! Process Command Runner
//!
//! Runs external tools (installer, OpenAPI generator, docker, kubectl) as
//! blocking child processes. No timeout; one attempt.

use std::process::{Command, Stdio};
use std::time::Instant;

use crate::domain::ports::{CommandError, CommandRunner, CommandSpec};

/// Runs commands with `std::process::Command`
///
/// Stderr is always captured so failures can report it. Stdout is shown
/// unless `quiet` (JSON output mode), where it would corrupt the stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    quiet: bool,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &CommandSpec) -> Result<(), CommandError> {
        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .current_dir(command.dir())
            .stdin(Stdio::null())
            .stderr(Stdio::piped());
        if self.quiet {
            cmd.stdout(Stdio::null());
        } else {
            cmd.stdout(Stdio::inherit());
        }

        let started = Instant::now();
        let output = cmd.output().map_err(|source| CommandError::Spawn {
            program: command.program().to_string(),
            source,
        })?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::warn!(
                command = %command.display(),
                code = ?output.status.code(),
                elapsed_ms,
                "command failed"
            );
            return Err(CommandError::Failed {
                command: command.display(),
                code: output.status.code(),
                stderr,
            });
        }

        tracing::info!(
            command = %command.display(),
            dir = %command.dir().display(),
            elapsed_ms,
            "command finished"
        );
        if !stderr.trim().is_empty() {
            tracing::debug!(command = %command.display(), stderr = %stderr.trim(), "command stderr");
        }
        Ok(())
    }
}
