// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Malformed search index: {0}")]
    Format(#[from] FormatError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Index version not found: {0}")]
    VersionNotFound(String),
}

/// Reasons a `searchindex.js` payload is rejected at load time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("expected `Search.setIndex(...)` or a bare object: {0}")]
    Envelope(String),

    #[error("invalid object literal at byte {offset}: {message}")]
    Literal { offset: usize, message: String },

    #[error("invalid index body: {0}")]
    Json(String),

    #[error("required table `{0}` is missing")]
    MissingKey(&'static str),

    #[error("table `{table}` has {found} entries, expected {expected}")]
    LengthMismatch {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("table `{table}` entry `{key}` references document {doc}, index has {documents}")]
    DanglingReference {
        table: &'static str,
        key: String,
        doc: usize,
        documents: usize,
    },

    #[error("object `{prefix}.{name}` references unknown object type {type_index}")]
    UnknownObjectType {
        prefix: String,
        name: String,
        type_index: usize,
    },
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::Serialization(err.to_string())
    }
}
