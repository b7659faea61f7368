//! Handle the normalize command - canonical re-serialization of a manifest

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::manifest::Manifest;

/// Handle the normalize command.
/// Prints the canonical form to `output`, or with `write` set rewrites the
/// file in place (atomically, and only when the bytes actually differ).
pub fn handle<W: Write>(path: &Path, write: bool, output: &mut W) -> Result<()> {
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest file: {:?}", path))?;
    let manifest =
        Manifest::parse(&original).with_context(|| format!("Failed to parse manifest file: {:?}", path))?;
    let canonical = manifest.to_yaml().context("Failed to serialize manifest")?;

    if !write {
        output.write_all(canonical.as_bytes())?;
        return Ok(());
    }

    if canonical == original {
        writeln!(output, "{}: already canonical", path.display())?;
        return Ok(());
    }

    manifest.save(path)?;
    tracing::info!("rewrote {:?} in canonical form", path);
    writeln!(output, "{}: rewrote", path.display())?;

    Ok(())
}
