//! Native compile stage
//!
//! Builds the compiler command line from the manifest:
//!
//! ```text
//! emcc FLAGS [RELEASE_FLAGS] SOURCES GENERATED -sEXPORTED_FUNCTIONS=_a,_b EXTRA -o OUTPUT
//! ```
//!
//! Release mode only adds flags; the sources and exports are the same.

use std::path::{Path, PathBuf};

use lunarbuild_core::{ActionResult, BuildTask, Config, pattern};

use crate::command::ToolCommand;
use crate::error::Result;

/// The compile stage, with sources expanded and paths resolved
#[derive(Debug, Clone)]
pub struct CompileStep {
    command: ToolCommand,
    inputs: Vec<PathBuf>,
    output: PathBuf,
}

impl CompileStep {
    /// Prepare the compile stage; `generated` are extra C sources produced
    /// by earlier stages
    pub fn new(config: &Config, generated: &[PathBuf], release: bool) -> Result<Self> {
        let compile = &config.project.compile;
        let base = &config.base_path;

        let mut inputs: Vec<PathBuf> = pattern::expand_all(base, compile.sources.as_slice())?
            .into_iter()
            .map(|p| base.join(p))
            .collect();
        inputs.extend(generated.iter().cloned());

        let output = config.resolve(&compile.output);

        let mut command = ToolCommand::new(&compile.program, base).args(&compile.flags);
        if release {
            command = command.args(&compile.release_flags);
        }
        command = command.args(inputs.iter().map(|p| relative_to(base, p)));
        if !compile.exports.is_empty() {
            command = command.arg(exported_functions(&compile.exports));
        }
        command = command
            .args(&compile.extra_args)
            .arg("-o")
            .arg(relative_to(base, &output));

        Ok(Self {
            command,
            inputs,
            output,
        })
    }

    /// The command that will run
    pub fn command(&self) -> &ToolCommand {
        &self.command
    }

    /// Every source passed to the compiler, in order
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Compiler output
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Wrap as a pipeline task
    pub fn into_task(self, name: &str) -> BuildTask {
        let Self {
            command,
            inputs,
            output,
        } = self;
        BuildTask::new(name, output, inputs, move || -> ActionResult {
            Ok(command.status()?)
        })
    }
}

/// `-sEXPORTED_FUNCTIONS=_a,_b`: C symbols carry a leading underscore
fn exported_functions(exports: &[String]) -> String {
    let symbols: Vec<String> = exports.iter().map(|name| format!("_{name}")).collect();
    format!("-sEXPORTED_FUNCTIONS={}", symbols.join(","))
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}
