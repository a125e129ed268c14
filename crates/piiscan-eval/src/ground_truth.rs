//! Externally-supplied ground-truth annotations.
//!
//! The on-disk format is consumed as-is, never generated here:
//!
//! ```json
//! {
//!     "ground_truth": [
//!         {"label": "PERSON", "left": 10, "top": 10, "width": 50, "height": 20}
//!     ],
//!     "all_pos": 1
//! }
//! ```

use crate::error::Result;
use piiscan_core::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One human-drawn annotation: an entity label with its bounding rectangle.
///
/// Immutable for the duration of an evaluation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruthBox {
    /// Annotated entity label
    pub label: String,
    /// Left edge
    pub left: u32,
    /// Top edge
    pub top: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl GroundTruthBox {
    /// Bounding rectangle of the annotation
    #[inline]
    #[must_use = "rectangle is computed but not used"]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}

/// The full ground-truth document for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruthFile {
    /// All annotated PII boxes
    pub ground_truth: Vec<GroundTruthBox>,
    /// Annotator's count of positive instances
    pub all_pos: u32,
}

/// Load a ground-truth JSON document from disk.
///
/// # Errors
///
/// Returns [`EvalError::Io`] when the file cannot be read and
/// [`EvalError::Json`] when it does not match the expected schema.
///
/// [`EvalError::Io`]: crate::error::EvalError::Io
/// [`EvalError::Json`]: crate::error::EvalError::Json
pub fn load_ground_truth<P: AsRef<Path>>(path: P) -> Result<GroundTruthFile> {
    let contents = std::fs::read_to_string(path)?;
    let file = serde_json::from_str(&contents)?;
    Ok(file)
}
