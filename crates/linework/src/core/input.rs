//! Loading picture text from disk
//!
//! A thin boundary in front of the parser: read a UTF-8 file and split it
//! into the row sequence [`parse_text_lines`](crate::core::parse_text_lines)
//! consumes.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::error::GridError;

/// Read a text file into grid rows.
pub fn load_lines(path: &Path) -> Result<Vec<String>, GridError> {
    let text = fs::read_to_string(path)
        .map_err(|source| GridError::io(path.display().to_string(), source))?;
    let lines: Vec<String> = text.lines().map(str::to_owned).collect();
    debug!(path = %path.display(), rows = lines.len(), "loaded grid");
    Ok(lines)
}
