//! Error types and result aliases for inilayer operations.
//!
//! Provides a unified error type that covers the failure modes of loading,
//! mutating and persisting layered configuration files.

use thiserror::Error;

/// Unified error type for all inilayer operations
#[derive(Error, Debug)]
pub enum LayerError {
    // Load errors
    #[error("Failed to parse {path}: {message} at line {line}")]
    IniParse {
        path: String,
        line: usize,
        message: String,
    },

    // Write routing errors
    #[error("Key '{key}' is not defined in any configuration source")]
    KeyNotFound { key: String },

    #[error("No configuration source is loaded from '{path}'")]
    UnknownSource { path: String },

    // Value errors
    #[error("Value '{raw}' cannot be read as {kind}")]
    InvalidValue { kind: String, raw: String },

    #[error("Key '{key}' cannot be written: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Unknown value kind '{name}'")]
    UnknownKind { name: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for inilayer operations
pub type LayerResult<T> = Result<T, LayerError>;

impl LayerError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LayerError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            LayerError::IniParse { .. } => {
                Some("Every line must be a [section] header, a key = value pair or a comment")
            },
            LayerError::KeyNotFound { .. } => {
                Some("Pass an explicit target file to create the key in a specific source")
            },
            LayerError::UnknownSource { .. } => {
                Some("Use the exact path the source was loaded from; run 'inilayer sources' to list them")
            },
            LayerError::InvalidValue { .. } => {
                Some("Lists are written as [a,b,c]; booleans as true or false; values fit on one line")
            },
            LayerError::InvalidKey { .. } => {
                Some("Keys must be non-blank, unpadded and free of '=', ':' and line breaks, and must not start with '[', '#' or ';'")
            },
            LayerError::UnknownKind { .. } => Some(
                "Valid kinds: string, bool, int, int64, uint, uint64, float32, float64, string_list, int_list",
            ),
            LayerError::Io { .. } => Some("Check that the file exists and is writable"),
        }
    }
}
