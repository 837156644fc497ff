pub mod output;

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Path that stands for standard input on the command line.
pub const STDIN_PATH: &str = "-";

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn read_stdin() -> Result<String> {
    let mut contents = String::new();
    std::io::stdin()
        .read_to_string(&mut contents)
        .context("Failed to read standard input")?;
    Ok(contents)
}

/// Reads `path`, or standard input when it is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new(STDIN_PATH) {
        read_stdin()
    } else {
        read_file(path)
    }
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
