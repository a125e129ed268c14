//! Error types for evaluation I/O.

use thiserror::Error;

/// Errors while loading externally-supplied evaluation inputs.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Ground-truth file could not be read
    #[error("failed to read ground truth: {0}")]
    Io(#[from] std::io::Error),

    /// Ground-truth file is not valid JSON for the expected schema
    #[error("failed to parse ground truth: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for evaluation I/O.
pub type Result<T> = std::result::Result<T, EvalError>;
