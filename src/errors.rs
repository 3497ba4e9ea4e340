/*!
 * Error types for the subtidy application.
 *
 * This module contains custom error types for the parsing core and the
 * application layer, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur during subtitle processing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A group is missing its index or timestamp line
    #[error("Malformed subtitle group, index and timestamp are required: \"{group}\"")]
    MalformedEntry {
        /// Raw text of the offending group
        group: String,
    },

    /// A bilingual group carries more than two text lines
    #[error("There are too many lines in group: \"{group}\"")]
    TooManyLines {
        /// Raw text of the offending group
        group: String,
    },

    /// A name dictionary line could not be understood
    #[error("Invalid name dictionary line {line_number}: \"{line}\"")]
    InvalidDictionaryLine {
        /// 1-based line number within the dictionary text
        line_number: usize,
        /// The line as it appeared
        line: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<SubtitleError>() {
            Ok(subtitle_error) => Self::Subtitle(subtitle_error),
            Err(error) => Self::Unknown(error.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
