//! Handle the check command - run structural checks and report findings

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::manifest::Manifest;
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Handle the check command.
/// Returns the number of error-severity findings so the caller can decide
/// the process exit code.
pub fn handle<W: Write>(path: &Path, format: OutputFormat, output: &mut W) -> Result<usize> {
    let manifest = Manifest::load(path)?;
    let findings = validate::validate(&manifest);

    let errors = findings.iter().filter(|f| f.is_error()).count();
    let warnings = findings.len() - errors;

    match format {
        OutputFormat::Text => {
            for finding in &findings {
                writeln!(output, "{}: {}", path.display(), finding)?;
            }
            if findings.is_empty() {
                writeln!(
                    output,
                    "{}: ok ({} sources, {} hooks)",
                    path.display(),
                    manifest.repos.len(),
                    manifest.hook_count()
                )?;
            } else {
                writeln!(output, "{} error(s), {} warning(s)", errors, warnings)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *output, &findings)
                .context("Failed to serialize findings")?;
            writeln!(output)?;
        }
    }

    Ok(errors)
}
