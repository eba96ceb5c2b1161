//! Bundle and minify stages
//!
//! Both run a configured program. The bundler writes its own output and
//! only its exit status matters. The minifier prints the result on stdout;
//! any diagnostic on stderr or an empty result fails the stage, otherwise
//! stdout is written atomically to the declared output.

use std::path::{Path, PathBuf};

use lunarbuild_core::config::ToolStageConfig;
use lunarbuild_core::{ActionResult, BuildTask, Config, FAILURE, SUCCESS, Status, fsutil};

use crate::command::{self, ToolCommand};
use crate::error::Result;

/// Where a tool's result ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The tool writes the output file itself
    Direct,
    /// The tool prints the output on stdout
    Stdout,
}

/// A stage driven by an external program
#[derive(Debug, Clone)]
pub struct ToolStep {
    command: ToolCommand,
    inputs: Vec<PathBuf>,
    output: PathBuf,
    mode: OutputMode,
}

impl ToolStep {
    /// Build a step from a manifest section
    pub fn new(config: &Config, stage: &ToolStageConfig, mode: OutputMode) -> Self {
        let cwd = match &stage.cwd {
            Some(cwd) => config.resolve(cwd),
            None => config.base_path.clone(),
        };
        Self {
            command: ToolCommand::new(&stage.program, cwd).args(&stage.args),
            inputs: stage.inputs.iter().map(|p| config.resolve(p)).collect(),
            output: config.resolve(&stage.output),
            mode,
        }
    }

    /// The bundle stage; `generated` are JS modules produced by earlier stages
    pub fn bundle(config: &Config, generated: &[PathBuf]) -> Self {
        let mut step = Self::new(config, &config.project.bundle, OutputMode::Direct);
        step.inputs.extend(generated.iter().cloned());
        step
    }

    /// The minify stage
    pub fn minify(config: &Config) -> Self {
        Self::new(config, &config.project.minify, OutputMode::Stdout)
    }

    /// The command that will run
    pub fn command(&self) -> &ToolCommand {
        &self.command
    }

    /// Declared inputs
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Declared output
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run the tool once
    pub fn run(&self) -> Result<Status> {
        match self.mode {
            OutputMode::Direct => self.command.status(),
            OutputMode::Stdout => self.run_captured(),
        }
    }

    fn run_captured(&self) -> Result<Status> {
        let output = self.command.output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::error!("{} reported:\n{}", self.command.program(), stderr.trim_end());
            return Ok(failure_code(command::exit_status(output.status)));
        }
        if !output.status.success() {
            return Ok(failure_code(command::exit_status(output.status)));
        }
        if output.stdout.is_empty() {
            tracing::error!("{} produced no output", self.command.program());
            return Ok(FAILURE);
        }

        fsutil::write_atomic(&self.output, &output.stdout)?;
        Ok(SUCCESS)
    }

    /// Wrap as a pipeline task
    pub fn into_task(self, name: &str) -> BuildTask {
        let output = self.output.clone();
        let inputs = self.inputs.clone();
        BuildTask::new(name, output, inputs, move || -> ActionResult {
            Ok(self.run()?)
        })
    }
}

/// A failed tool whose exit code is zero still fails the stage
fn failure_code(code: Status) -> Status {
    if code == SUCCESS { FAILURE } else { code }
}
