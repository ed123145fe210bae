//! Error taxonomy shared by every FARS operation.

use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading, summarizing, or mapping census files.
#[derive(Debug)]
pub enum FarsError {
    /// The year could not be coerced to an integer.
    InvalidYear(String),
    /// The source file does not exist.
    FileNotFound(PathBuf),
    /// The file exists but could not be decoded or parsed.
    ParseFailure { path: PathBuf, message: String },
    /// The state code is not present in the year's file.
    InvalidStateNumber(String),
    /// None of the requested years produced a table.
    AggregationError,
    /// The map backend failed to draw or write its output.
    RenderFailure(String),
}

impl fmt::Display for FarsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FarsError::InvalidYear(year) => write!(f, "invalid year: {year}"),
            FarsError::FileNotFound(path) => {
                write!(f, "file '{}' does not exist", path.display())
            }
            FarsError::ParseFailure { path, message } => {
                write!(f, "failed to parse '{}': {message}", path.display())
            }
            FarsError::InvalidStateNumber(state) => write!(f, "invalid STATE number: {state}"),
            FarsError::AggregationError => {
                write!(f, "no valid years to summarize")
            }
            FarsError::RenderFailure(msg) => write!(f, "map rendering failed: {msg}"),
        }
    }
}

impl std::error::Error for FarsError {}

impl FarsError {
    /// Builds a [`FarsError::ParseFailure`] from any displayable cause.
    pub(crate) fn parse(path: impl Into<PathBuf>, cause: impl fmt::Display) -> Self {
        FarsError::ParseFailure {
            path: path.into(),
            message: cause.to_string(),
        }
    }
}
