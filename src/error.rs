//! Error types for the tabdecoder library

use std::io;

/// Library error type for tabdecoder operations
#[derive(Debug, thiserror::Error)]
pub enum TabError {
    /// Decoding error when reading tablature text
    #[error("parsing error: {0}")]
    ParsingError(#[from] DecodeError),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for TabError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}

/// Failure of a single `decode` call.
///
/// Line numbers are 1-based and refer to the raw input, headers and blank lines included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("not enough tab lines: found {found}, need at least {required}")]
    InsufficientLines { found: usize, required: usize },

    #[error("string count must be greater than zero")]
    InvalidStringCount,

    /// Strict mode only
    #[error("line {line_number} is too short to hold a root note and a separator: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    /// Strict mode only
    #[error("{lines} tab lines do not form complete blocks of {string_count} strings")]
    IncompleteBlock { lines: usize, string_count: usize },

    /// Strict mode only
    #[error("line {line_number} has root {found:?} but its string is tuned to {expected:?}")]
    RootMismatch {
        line_number: usize,
        expected: char,
        found: char,
    },
}
