//! Blocking child process invocation

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use lunarbuild_core::{FAILURE, Status};

use crate::error::{Error, Result};

/// A program, its arguments and working directory
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
    cwd: PathBuf,
}

impl ToolCommand {
    /// Create a command run from `cwd`
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in order
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Run with inherited stdio and wait for the exit status
    pub fn status(&self) -> Result<Status> {
        tracing::debug!("running {}", self);
        let status = self
            .command()
            .status()
            .map_err(|source| self.spawn_error(source))?;
        Ok(exit_status(status))
    }

    /// Run with stdout and stderr captured
    pub fn output(&self) -> Result<Output> {
        tracing::debug!("running {}", self);
        self.command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| self.spawn_error(source))
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(&self.cwd);
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> Error {
        Error::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl std::fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        write!(f, " (in {})", self.cwd.display())
    }
}

/// Map an exit status to a stage status; death by signal is [`FAILURE`]
pub fn exit_status(status: ExitStatus) -> Status {
    status.code().unwrap_or(FAILURE)
}
