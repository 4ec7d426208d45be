//! Command Runner Port
//!
//! Runs out-of-process tools (package installer, OpenAPI generator,
//! deployment applier). Success is the exit status; output is not parsed.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error running an external command
#[derive(Debug, Error)]
pub enum CommandError {
    /// Nothing to run
    #[error("empty command line")]
    Empty,
    /// Program could not be started
    #[error("cannot start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// Program ran and exited unsuccessfully
    #[error("'{command}' failed with exit code {code:?}{}", format_stderr(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    let line = stderr.trim().lines().last().unwrap_or_default();
    if line.is_empty() {
        String::new()
    } else {
        format!(": {}", line)
    }
}

/// A command line plus the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    dir: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: dir.into(),
        }
    }

    /// Build from an argv list (`["poetry", "install"]`)
    pub fn from_argv(argv: &[String], dir: impl Into<PathBuf>) -> Result<Self, CommandError> {
        let (program, args) = argv.split_first().ok_or(CommandError::Empty)?;
        if program.trim().is_empty() {
            return Err(CommandError::Empty);
        }
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            dir: dir.into(),
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `program arg1 arg2`
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs a command to completion. Single attempt, no timeout.
pub trait CommandRunner {
    fn run(&self, command: &CommandSpec) -> Result<(), CommandError>;
}
