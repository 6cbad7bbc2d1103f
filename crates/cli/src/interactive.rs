//! User interaction utilities for the CLI.
//!
//! Responsibilities:
//! - Ask for confirmation before destructive commands.

use anyhow::Result;
use std::io::{BufRead, Write};

/// Prompt for delete confirmation on stdout, reading the answer from stdin.
///
/// Returns `Ok(true)` only for `y`/`Y`. An empty or closed stdin declines.
pub fn confirm_delete(key: &str, noun: &str) -> Result<bool> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    confirm_delete_with(key, noun, &mut stdin.lock(), &mut stdout)
}

fn confirm_delete_with(
    key: &str,
    noun: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<bool> {
    write!(output, "Are you sure you want to delete '{}' from {}? [y/N] ", key, noun)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    if !answer.trim().eq_ignore_ascii_case("y") {
        writeln!(output, "Delete cancelled.")?;
        return Ok(false);
    }

    Ok(true)
}
