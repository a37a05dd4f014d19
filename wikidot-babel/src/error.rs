//! Errors of the format layer.
//!
//! The converter itself never fails: export, import and metadata scanning
//! absorb malformed input and return plain values. Errors only come from
//! fragment parsing, JSON (de)serialization and registry lookups.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No format registered under this name
    FormatNotFound(String),
    /// Input could not be turned into a tree
    ParseError(String),
    /// Tree could not be written out
    SerializationError(String),
    /// The format does not offer the requested direction
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            FormatError::ParseError(err.to_string())
        } else {
            FormatError::SerializationError(err.to_string())
        }
    }
}
