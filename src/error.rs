//! Error types for plainpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for plainpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while synthesizing or inspecting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The destination rejected the finished document.
    #[error("Write error: {0}")]
    Write(#[source] io::Error),

    /// Text cannot be represented in the required byte encoding.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Layout or write options are unusable.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// An object references an identifier that is not in the document.
    #[error("Missing required object: {0}")]
    MissingObject(String),

    /// The PDF structure is corrupted or malformed.
    #[error("Corrupted PDF structure: {0}")]
    Corrupted(String),

    /// The data is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// No converter is registered for the input.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Error compressing a content stream.
    #[error("Compression error: {0}")]
    Compression(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error came from the output destination rather than
    /// from building the document.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Error::Write(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", err))
    }
}
