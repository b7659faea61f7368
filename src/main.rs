#![deny(clippy::mod_module_files)]
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod error;
mod manifest;
mod validate;

use commands::check::OutputFormat;
use manifest::{Manifest, MANIFEST_FILE_NAMES};

/// Inspect and normalize pre-commit hook manifests
#[derive(Parser)]
#[command(name = "hookfile", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the manifest and run structural checks against it
    Check {
        /// Manifest path (default: discover in the current directory)
        path: Option<PathBuf>,

        /// Output format for findings
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the hook sources and hook ids the manifest declares
    List {
        /// Manifest path (default: discover in the current directory)
        path: Option<PathBuf>,
    },

    /// Re-serialize the manifest in canonical form
    Normalize {
        /// Manifest path (default: discover in the current directory)
        path: Option<PathBuf>,

        /// Rewrite the file in place instead of printing to stdout
        #[arg(long)]
        write: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("hookfile: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut stdout = io::stdout();

    match cli.command {
        Command::Check { path, format } => {
            let path = resolve_manifest_path(path)?;
            let errors = commands::check::handle(&path, format, &mut stdout)?;
            if errors > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::List { path } => {
            let path = resolve_manifest_path(path)?;
            commands::list::handle(&path, &mut stdout)?;
        }
        Command::Normalize { path, write } => {
            let path = resolve_manifest_path(path)?;
            commands::normalize::handle(&path, write, &mut stdout)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Use the explicit path when given, otherwise probe the current directory
fn resolve_manifest_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            Manifest::discover(&cwd).with_context(|| {
                format!(
                    "No manifest found in {:?} (expected {})",
                    cwd,
                    MANIFEST_FILE_NAMES.join(" or ")
                )
            })
        }
    }
}
