/*!
 * Error types for the lexicon library.
 *
 * This module contains custom error types for the storage layer, the
 * exchange codec and the application as a whole, using the thiserror
 * crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with the word store
#[derive(Error, Debug)]
pub enum StoreError {
    /// A statement failed to prepare or step
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An entity was used in a state the operation does not allow,
    /// e.g. an update of a word that was never persisted
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A transaction could not be committed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

impl StoreError {
    /// Shorthand for a missing surrogate id on an entity that must be persisted
    pub fn missing_id(entity: &str) -> Self {
        Self::InvalidState(format!("{} has no id", entity))
    }
}

/// Errors that can occur while decoding exchange or material files.
///
/// These are record-level: the import loops log them and skip the
/// offending record, the rest of the file is still processed.
#[derive(Error, Debug, PartialEq)]
pub enum CodecError {
    /// A word line did not split into the expected number of fields
    #[error("Wrong word format, expected {expected} fields but found {found}: {line}")]
    WrongFieldCount {
        /// Number of fields the format requires
        expected: usize,
        /// Number of fields in the line
        found: usize,
        /// The offending line
        line: String,
    },

    /// A translation or topic sub-field did not split into `key=value`
    #[error("Wrong {kind} format: {part}")]
    WrongPartCount {
        /// "translation" or "topic"
        kind: &'static str,
        /// The offending sub-field
        part: String,
    },

    /// A topic level is not an integer
    #[error("Invalid topic level: {0}")]
    InvalidLevel(String),

    /// A header line is missing its mandatory fields
    #[error("Malformed header: {0}")]
    MalformedHeader(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the word store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from the exchange codec
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
