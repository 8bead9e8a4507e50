//! Terrain error types.

/// Errors that can occur when reading or writing a colour file.
#[derive(Debug, thiserror::Error)]
pub enum ColourFileError {
    /// Failed to read the colour file from disk.
    #[error("failed to read colour file: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the colour file to disk.
    #[error("failed to write colour file: {0}")]
    WriteError(#[source] std::io::Error),

    /// A line did not hold exactly three comma-separated values.
    #[error("line {line} should be in the form r,g,b: {text}")]
    BadLine { line: usize, text: String },

    /// A value could not be parsed as a number.
    #[error("bad number on line {line}: {source}")]
    BadNumber {
        line: usize,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// The file held the wrong number of colours.
    #[error("expected {expected} colours, found {found}")]
    WrongColourCount { expected: usize, found: usize },
}
