//! lunarbuild Code Generation
//!
//! This crate derives the C ↔ JS glue for a set of declarative macro
//! invocations, such as the `BOARD_BEGIN(name, ...)` entries of a preset
//! board list.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌─────────┐     ┌─────────┐     ┌──────────────┐
//! │ Source  │────▶│  Name   │────▶│ C dispatch   │
//! │  text   │     │  Table  │──┐  └──────────────┘
//! └─────────┘     └─────────┘  │  ┌──────────────┐
//!                              └─▶│ JS id table  │
//!                                 └──────────────┘
//! ```
//!
//! Both fragments come from the same [`NameTable`] and are written
//! together or not at all, so ids never disagree across the boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use lunarbuild_codegen::{Generator, Marker, NameTable};
//!
//! let marker = Marker::new("BOARD_BEGIN")?;
//! let table = NameTable::extract(&source, &marker);
//! let pair = Generator::from_config(&config)?.generate(&table)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod emit;
pub mod error;
pub mod generator;
pub mod stage;
pub mod table;

pub use error::{Error, Result};
pub use generator::{ArtifactPair, Generator};
pub use table::{Marker, NameTable};
