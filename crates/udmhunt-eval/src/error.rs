//! Evaluation-side error types.
//!
//! Scanning itself never fails and query errors are reported by
//! `udmhunt_parser`: these errors come from loading and writing events.

use thiserror::Error;

/// Errors that can occur while reading or writing event sources.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Reading an event source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An event source was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, EvalError>;
