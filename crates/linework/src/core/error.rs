//! Error types for the input-loading boundary
//!
//! Parsing and extraction are total; the only thing that can fail is
//! getting the text into memory in the first place.

use thiserror::Error;

/// Errors raised while loading a grid from disk
#[derive(Error, Debug)]
pub enum GridError {
    #[error("failed to read grid from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl GridError {
    /// Create an I/O error carrying the offending path
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        use std::io;
        let error = GridError::io(
            "diagram.txt",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let message = format!("{}", error);
        assert!(message.contains("diagram.txt"));
        assert!(message.contains("no such file"));
    }
}
