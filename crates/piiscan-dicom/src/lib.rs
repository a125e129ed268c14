//! DICOM specialization for piiscan-rs
//!
//! Medical images carry their pixel payload inside a structured container
//! with its own sample formats (8/16-bit, signed/unsigned, MONOCHROME1/2)
//! and display transforms (rescale slope/intercept, window center/width).
//! This crate extracts a displayable 8-bit grayscale buffer from a DICOM
//! object and plugs it into the generic verify/eval pipeline through the
//! engine's `ImageSource` boundary — the core pipeline knows nothing about
//! DICOM.
//!
//! All reported coordinates are in the original (unpadded) pixel buffer's
//! space, exactly as for plain raster images.

pub mod engine;
pub mod error;
pub mod pixels;

pub use engine::DicomPiiVerifyEngine;
pub use error::{DicomError, Result};
pub use pixels::{extract_pixels, DicomSource};
