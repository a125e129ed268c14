//! Error types for DICOM pixel extraction.

use thiserror::Error;

/// Errors while turning a DICOM object into a displayable pixel buffer.
#[derive(Error, Debug)]
pub enum DicomError {
    /// Failed to open or read a DICOM file
    #[error("failed to read DICOM object: {0}")]
    Read(#[from] dicom_object::ReadError),

    /// A tag required for pixel interpretation is absent
    #[error("missing DICOM tag: {0}")]
    MissingTag(&'static str),

    /// Pixel data is present but cannot be interpreted
    #[error("unsupported or inconsistent pixel data: {0}")]
    Pixels(String),
}

/// Result type alias for DICOM operations.
pub type Result<T> = std::result::Result<T, DicomError>;
