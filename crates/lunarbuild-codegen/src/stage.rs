//! Generation stages
//!
//! A generation stage reads one source file, extracts its name table and
//! writes both fragments. Both are declared outputs, so losing either one
//! regenerates the pair. The frontend fragment is the primary output.

use std::path::PathBuf;

use lunarbuild_core::config::GeneratorConfig;
use lunarbuild_core::{ActionResult, BuildTask, Config, SUCCESS};

use crate::emit;
use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::table::{Marker, NameTable};

/// A configured generator with its paths resolved
pub struct Generation {
    name: String,
    source: PathBuf,
    native_output: PathBuf,
    frontend_output: PathBuf,
    marker: Marker,
    generator: Generator,
}

impl Generation {
    /// Resolve a manifest entry; invalid markers and templates fail here
    pub fn new(config: &Config, generator: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            name: generator.name.clone(),
            source: config.resolve(&generator.source),
            native_output: config.resolve(&generator.native.output),
            frontend_output: config.resolve(&generator.frontend.output),
            marker: Marker::new(&generator.marker)?,
            generator: Generator::from_config(generator)?,
        })
    }

    /// Generated C file
    pub fn native_output(&self) -> &PathBuf {
        &self.native_output
    }

    /// Generated JS module
    pub fn frontend_output(&self) -> &PathBuf {
        &self.frontend_output
    }

    /// Read the source and extract its table
    pub fn table(&self) -> Result<NameTable> {
        let text = std::fs::read_to_string(&self.source).map_err(|source| Error::ReadSource {
            path: self.source.display().to_string(),
            source,
        })?;
        Ok(NameTable::extract(&text, &self.marker))
    }

    /// Extract, render and write both fragments
    pub fn run(&self) -> Result<()> {
        let table = self.table()?;
        let pair = self.generator.generate(&table)?;
        emit::write_pair(&pair, &self.native_output, &self.frontend_output)?;
        tracing::info!("[{}] generated {} entries", self.name, table.len());
        Ok(())
    }

    /// Wrap this generation as a pipeline task
    pub fn into_task(self) -> BuildTask {
        let name = self.name.clone();
        let frontend = self.frontend_output.clone();
        let native = self.native_output.clone();
        let inputs = vec![self.source.clone()];
        BuildTask::new(name, frontend, inputs, move || -> ActionResult {
            self.run()?;
            Ok(SUCCESS)
        })
        .with_output(native)
    }
}
