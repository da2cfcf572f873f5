//! Error types for ledgerbook
//!
//! Every fallible operation in the crate returns [`LedgerResult`]. The
//! variants map one-to-one onto the ways a caller has to react: bad user
//! input, a missing year file (fall back to an empty ledger), an unreadable
//! file, or an unreachable remote.

use std::path::Path;

use thiserror::Error;

/// The main error type for ledgerbook operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Unparseable date or amount handed to the ledger
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The addressed ledger file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The file exists but its tabular structure cannot be read
    #[error("Corrupt file {path}: {reason}")]
    CorruptFile { path: String, reason: String },

    /// Remote gateway authentication or transport failure
    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "file not found" error for a path
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::FileNotFound(path.as_ref().display().to_string())
    }

    /// Create a "corrupt file" error for a path
    pub fn corrupt(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::CorruptFile {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }

    /// Check if this is an input validation error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for ledgerbook operations
pub type LedgerResult<T> = Result<T, LedgerError>;
