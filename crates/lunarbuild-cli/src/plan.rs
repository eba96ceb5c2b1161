//! Stage assembly
//!
//! Turns a loaded manifest into the fixed stage order:
//! generators, compile, bundle, minify, then one copy per static asset.
//! Generated C files feed the compile stage; generated JS modules feed
//! the bundle stage.

use std::path::PathBuf;

use anyhow::{Context, Result};
use lunarbuild_codegen::stage::Generation;
use lunarbuild_core::{BuildContext, Config, Pipeline, Timestamp, assets};
use lunarbuild_toolchain::{CompileStep, ToolStep};

/// Read-only settings for this invocation.
///
/// The tool's own timestamp is the newer of the running executable and
/// the manifest, so editing either invalidates every output.
pub fn context(config: &Config, force: bool) -> BuildContext {
    let exe = std::env::current_exe().ok();
    let tool_stamp = Timestamp::newest_of(
        exe.iter()
            .map(PathBuf::as_path)
            .chain([config.manifest_path.as_path()]),
    );
    BuildContext::new(tool_stamp).with_force(force)
}

fn with_directories(config: &Config) -> Pipeline {
    config
        .project
        .directories
        .iter()
        .fold(Pipeline::new(), |pipeline, dir| {
            pipeline.with_directory(config.resolve(dir))
        })
}

fn generations(config: &Config) -> Result<Vec<Generation>> {
    config
        .project
        .generators
        .iter()
        .map(|g| {
            Generation::new(config, g).with_context(|| format!("Invalid generator '{}'", g.name))
        })
        .collect()
}

/// Only the generation stages
pub fn generate_pipeline(config: &Config) -> Result<Pipeline> {
    let mut pipeline = with_directories(config);
    for generation in generations(config)? {
        pipeline.push(generation.into_task());
    }
    Ok(pipeline)
}

/// The full pipeline
pub fn build_pipeline(config: &Config, release: bool) -> Result<Pipeline> {
    let mut pipeline = with_directories(config);

    let mut generated_c = Vec::new();
    let mut generated_js = Vec::new();
    for generation in generations(config)? {
        generated_c.push(generation.native_output().clone());
        generated_js.push(generation.frontend_output().clone());
        pipeline.push(generation.into_task());
    }

    let compile = CompileStep::new(config, &generated_c, release)
        .context("Failed to prepare compile stage")?;
    pipeline.push(compile.into_task("build_backend"));
    pipeline.push(ToolStep::bundle(config, &generated_js).into_task("build_bundle"));
    pipeline.push(ToolStep::minify(config).into_task("minify_bundle"));

    for asset in assets::collect(config).context("Failed to expand static assets")? {
        pipeline.push(asset.task());
    }

    Ok(pipeline)
}

/// Every file the full pipeline writes
pub fn outputs(config: &Config) -> Result<Vec<PathBuf>> {
    Ok(build_pipeline(config, config.project.release)?
        .stages()
        .iter()
        .flat_map(|stage| stage.task().outputs().iter().cloned())
        .collect())
}
