//! Error types for minder-core operations.

use std::path::PathBuf;

/// All errors that can occur in minder-core operations.
///
/// Collaborator outcomes (window not focused, process absent, activation
/// refused) are ordinary data and never surface here; this enum covers the
/// paths that carry real failure, most of them startup-time.
#[derive(Debug, thiserror::Error)]
pub enum MinderError {
    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Attendance ledger malformed: {path}: {details}")]
    LedgerMalformed { path: PathBuf, details: String },

    #[error("Invalid duration text {text:?}: {reason}")]
    InvalidDuration { text: String, reason: String },

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON encoding error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using MinderError.
pub type Result<T> = std::result::Result<T, MinderError>;
