//! Error types for persistkv
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

use crate::value::ValueKind;

/// Result type alias using PersistError
pub type Result<T> = std::result::Result<T, PersistError>;

/// Unified error type for persistkv operations
#[derive(Debug, Error)]
pub enum PersistError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    /// File content is present but is not a valid encoding of the mapping.
    /// An empty file never produces this.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Store is not open")]
    NotOpen,

    #[error("Store is already open")]
    AlreadyOpen,

    #[error("There is no open connection")]
    NoConnection,

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("No value is stored with the key {0:?}")]
    KeyNotFound(String),

    #[error("Type mismatch for key {key:?}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Unwrap a store result or abort the calling thread.
///
/// Opt-in escalation for call sites that cannot do anything useful with an
/// error. The library itself never calls this.
///
/// # Panics
/// Panics with the error's message if `result` is `Err`.
#[track_caller]
pub fn must<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{}", e),
    }
}
