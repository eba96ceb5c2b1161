//! Configuration parsing and validation
//!
//! This module handles loading the `lunarbuild.yaml` project manifest.
//! Every relative path in the manifest is resolved against the directory
//! that contains it.
//!
//! # Sections
//!
//! - `directories` - output directories created before any stage runs
//! - `generators` - name-table code generators (C dispatch + JS table)
//! - `compile` / `bundle` / `minify` - external tool stages
//! - `static` - assets copied verbatim into the output tree

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default manifest file name
pub const MANIFEST_FILE: &str = "lunarbuild.yaml";

/// Root project configuration from `lunarbuild.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Build with release flags
    #[serde(default)]
    pub release: bool,

    /// Output directories to create up front
    #[serde(default)]
    pub directories: Vec<PathBuf>,

    /// Name table generators, run before the compile stage
    #[serde(default)]
    pub generators: Vec<GeneratorConfig>,

    /// Native compile stage
    pub compile: CompileConfig,

    /// Frontend bundle stage
    pub bundle: ToolStageConfig,

    /// Minify stage (tool output is captured from stdout)
    pub minify: ToolStageConfig,

    /// Static assets
    #[serde(default, rename = "static")]
    pub static_assets: StaticConfig,
}

/// A generator deriving a C dispatch function and a JS id table from
/// the marker invocations found in one source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Generator name, also used as the stage name
    pub name: String,

    /// File scanned for marker invocations
    pub source: PathBuf,

    /// Macro name whose first argument is captured, e.g. `BOARD_BEGIN`
    pub marker: String,

    /// Native (C) fragment settings
    pub native: NativeTargetConfig,

    /// Frontend (JS) fragment settings
    pub frontend: FrontendTargetConfig,
}

/// Native dispatch fragment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeTargetConfig {
    /// Generated C file
    pub output: PathBuf,

    /// Header included at the top of the generated unit
    #[serde(default)]
    pub include: Option<String>,

    /// Name of the generated entry point
    pub function: String,

    /// C type of the destination handle, e.g. `DisplayableBoard *`
    pub handle: String,

    /// Statement emitted for each case; `{{ name }}`, `{{ id }}` and
    /// `{{ dest }}` are available
    #[serde(rename = "case")]
    pub case_template: String,
}

/// Frontend table fragment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendTargetConfig {
    /// Generated JS module
    pub output: PathBuf,

    /// Exported binding name
    pub export: String,
}

/// Native compile stage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Compiler executable
    #[serde(default = "default_compiler")]
    pub program: String,

    /// Flags passed in every mode
    #[serde(default)]
    pub flags: Vec<String>,

    /// Flags appended in release mode only
    #[serde(default)]
    pub release_flags: Vec<String>,

    /// Source files; entries with `*` or `?` are expanded
    #[serde(default)]
    pub sources: Vec<String>,

    /// Exported native functions (without the leading underscore)
    #[serde(default)]
    pub exports: Vec<String>,

    /// Arguments appended after the export list
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Compiler output
    pub output: PathBuf,
}

fn default_compiler() -> String {
    "emcc".to_string()
}

/// Settings for a stage driven by an external program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolStageConfig {
    /// Executable
    pub program: String,

    /// Arguments
    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory (defaults to the project directory)
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Declared inputs
    #[serde(default)]
    pub inputs: Vec<PathBuf>,

    /// Declared output
    pub output: PathBuf,
}

/// Static asset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticConfig {
    /// Directory assets are read from
    #[serde(default)]
    pub from: PathBuf,

    /// Directory assets are copied to
    #[serde(default = "default_static_to")]
    pub to: PathBuf,

    /// Asset paths relative to `from`; entries with `*` or `?` are expanded
    #[serde(default)]
    pub files: Vec<String>,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            from: PathBuf::new(),
            to: default_static_to(),
            files: Vec::new(),
        }
    }
}

fn default_static_to() -> PathBuf {
    PathBuf::from("dist")
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Base path of the project
    pub base_path: PathBuf,

    /// Path of the manifest that was loaded
    pub manifest_path: PathBuf,
}

impl Config {
    /// Load configuration from a project directory or a manifest file
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::load("./lunar")?;
    /// println!("Project: {}", config.project.name);
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let (manifest_path, base_path) = locate(path);

        if !manifest_path.exists() {
            return Err(Error::ConfigNotFound {
                path: manifest_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&manifest_path)?;
        let project = Self::parse(&contents)?;

        Ok(Self {
            project,
            base_path,
            manifest_path,
        })
    }

    /// Parse and validate a manifest
    pub fn parse(yaml: &str) -> Result<ProjectConfig> {
        let project: ProjectConfig = serde_yaml::from_str(yaml)?;
        validate(&project)?;
        Ok(project)
    }

    /// Resolve a manifest-relative path
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_path.join(path)
    }

    /// Look up a generator by name
    pub fn generator(&self, name: &str) -> Option<&GeneratorConfig> {
        self.project.generators.iter().find(|g| g.name == name)
    }
}

/// Split a `--config` argument into the manifest path and the project
/// directory; a bare file name lives in `.`
fn locate(path: &Path) -> (PathBuf, PathBuf) {
    if path.is_dir() {
        return (path.join(MANIFEST_FILE), path.to_path_buf());
    }
    let base = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    (path.to_path_buf(), base.to_path_buf())
}

fn validate(project: &ProjectConfig) -> Result<()> {
    for (i, generator) in project.generators.iter().enumerate() {
        if generator.marker.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                message: format!("generator '{}' has an empty marker", generator.name),
            });
        }
        if generator.native.output == generator.frontend.output {
            return Err(Error::ConfigInvalid {
                message: format!(
                    "generator '{}' writes both fragments to {}",
                    generator.name,
                    generator.native.output.display()
                ),
            });
        }
        if project.generators[..i]
            .iter()
            .any(|g| g.name == generator.name)
        {
            return Err(Error::ConfigInvalid {
                message: format!("duplicate generator name '{}'", generator.name),
            });
        }
    }
    Ok(())
}
