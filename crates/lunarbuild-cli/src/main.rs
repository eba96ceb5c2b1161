//! lunarbuild CLI
//!
//! Incremental build driver: generates glue code, compiles the native
//! backend, bundles and minifies the frontend, and copies static assets.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lunarbuild_core::{FAILURE, SUCCESS, Status};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod plan;

/// lunarbuild - incremental build pipeline
#[derive(Parser)]
#[command(name = "lunarbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Manifest path (or project directory)
    #[arg(short, long, default_value = "lunarbuild.yaml", env = "LUNARBUILD_CONFIG")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the whole pipeline
    Build {
        /// Compile with release flags
        #[arg(long)]
        release: bool,

        /// Rebuild every stage (ignore cache)
        #[arg(long)]
        force: bool,
    },

    /// Run only the code generation stages
    Generate {
        /// Regenerate even if up to date
        #[arg(long)]
        force: bool,
    },

    /// Print the name table of a generator
    Table {
        /// Generator name
        name: String,
    },

    /// Remove every stage output
    Clean,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let status = match cli.command {
        Commands::Build { release, force } => commands::build::run(&cli.config, release, force)?,
        Commands::Generate { force } => commands::generate::run(&cli.config, force)?,
        Commands::Table { name } => commands::table::run(&cli.config, &name)?,
        Commands::Clean => commands::clean::run(&cli.config)?,
    };

    Ok(exit_code(status))
}

/// Exit codes outside `1..=255` would wrap or read as success
fn exit_code(status: Status) -> ExitCode {
    match status {
        SUCCESS => ExitCode::SUCCESS,
        code => match u8::try_from(code) {
            Ok(code) => ExitCode::from(code),
            Err(_) => ExitCode::from(FAILURE as u8),
        },
    }
}
