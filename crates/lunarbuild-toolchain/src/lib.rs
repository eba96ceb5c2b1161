//! lunarbuild Toolchain
//!
//! Stages that delegate to external programs: the native compiler, the
//! module bundler and the minifier. Every tool runs as a blocking child
//! process; its exit status becomes the stage status.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lunarbuild_toolchain::{CompileStep, ToolStep};
//!
//! pipeline.push(CompileStep::new(&config, &generated_c, release)?.into_task("build_backend"));
//! pipeline.push(ToolStep::bundle(&config, &generated_js).into_task("build_bundle"));
//! pipeline.push(ToolStep::minify(&config).into_task("minify_bundle"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod compile;
pub mod error;
pub mod step;

pub use command::ToolCommand;
pub use compile::CompileStep;
pub use error::{Error, Result};
pub use step::{OutputMode, ToolStep};
