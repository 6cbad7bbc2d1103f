//! Common utilities for formatters.
//!
//! Responsibilities:
//! - Standardized missing/null value handling.
//! - Atomic file writing.
//!
//! Does NOT handle:
//! - Format-specific logic (lives in respective formatter modules).

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use super::OutputFormat;

/// String representation for missing or null values in Table and CSV output.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

/// Write formatted output to a file, or to stdout when `output_file` is None.
pub fn output_result(
    output: &str,
    format: OutputFormat,
    output_file: Option<&std::path::PathBuf>,
) -> Result<()> {
    if let Some(path) = output_file {
        write_to_file(output, path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!(
            "Results written to {} ({:?} format)",
            path.display(),
            format
        );
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Write formatted output to a file atomically.
///
/// Creates parent directories if needed, writes to a temp file, then renames.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
