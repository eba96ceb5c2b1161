//! lunarbuild Core Library
//!
//! This crate provides the machinery shared by every lunarbuild stage:
//! - Project manifest parsing (`lunarbuild.yaml`)
//! - Modification-time staleness checks
//! - Cached stages wrapping a build action
//! - The fail-fast pipeline executor
//! - Static asset expansion and copying
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  BuildTask  │────▶│ CachedStage │────▶│  Pipeline   │
//! │ (out, ins)  │     │ (freshness) │     │ (fail-fast) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use lunarbuild_core::{BuildContext, BuildTask, Pipeline, SUCCESS};
//!
//! let ctx = BuildContext::new(None);
//! let mut pipeline = Pipeline::new();
//! pipeline.push(BuildTask::new("hello", "out.txt", vec!["in.txt".into()], || Ok(SUCCESS)));
//! std::process::exit(pipeline.run(&ctx));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assets;
pub mod config;
pub mod error;
pub mod freshness;
pub mod fsutil;
pub mod pattern;
pub mod pipeline;
pub mod stage;

pub use config::{Config, ProjectConfig};
pub use error::{Error, Result};
pub use freshness::{Freshness, StaleReason, Timestamp};
pub use pipeline::Pipeline;
pub use stage::{Action, ActionResult, BuildContext, BuildTask, CachedStage, FAILURE, SUCCESS, Status};
