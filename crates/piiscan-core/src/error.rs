//! Error types for the core transform layer.

use thiserror::Error;

/// Errors produced while normalizing collaborator output.
///
/// Collaborator failures themselves (OCR engine, analyzer, image decode) are
/// not represented here: they propagate unmodified from the crates that call
/// the collaborators. This enum only covers structurally invalid data handed
/// to the transform layer.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Parallel arrays in raw OCR output have inconsistent lengths.
    ///
    /// The OCR contract is one entry per detected word across every field;
    /// a ragged field means the output cannot be interpreted and the call
    /// fails fast with no partial result.
    #[error("malformed OCR output: field `{field}` has {actual} entries, expected {expected}")]
    MalformedInput {
        /// Name of the offending parallel array
        field: &'static str,
        /// Entry count of the reference field (`text`)
        expected: usize,
        /// Entry count actually observed
        actual: usize,
    },
}

/// Result type alias for core transform operations.
pub type Result<T> = std::result::Result<T, CoreError>;
