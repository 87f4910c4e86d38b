// Sampler error taxonomy. Never fatal: each sampler renders its own token on Err.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// Source file or directory could not be opened or read.
    #[error("reading {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A record in the source did not have the expected shape.
    #[error("unparseable record in {}: {line:?}", .path.display())]
    Unparseable { path: PathBuf, line: String },

    /// A required field was absent from the source.
    #[error("{field} not found in {}", .path.display())]
    MissingField { path: PathBuf, field: &'static str },

    /// A denominator (memory total, battery capacity) was zero.
    #[error("{what} is zero")]
    Zero { what: &'static str },
}

impl SampleError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SampleError::Unreadable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unparseable(path: impl Into<PathBuf>, line: &str) -> Self {
        SampleError::Unparseable {
            path: path.into(),
            line: line.to_string(),
        }
    }
}
