//! Collaborator traits: OCR, PII analysis, and image sources.
//!
//! The engines own none of the inference. OCR and NLP are pluggable
//! collaborators with narrow contracts, and image containers (plain raster,
//! DICOM, ...) plug in through [`ImageSource`] rather than through
//! specialization of the engines themselves.
//!
//! Collaborator errors cross these boundaries unmodified: no retries, no
//! suppression, no internal recovery policy. Implementations are expected to
//! be stateless per call; if a backing library is not reentrant, callers
//! serialize access to that instance.

use anyhow::Result;
use image::DynamicImage;
use piiscan_core::{RawOcrOutput, TextSpan};

/// Word-level OCR collaborator.
///
/// Input is a pixel buffer; output is one `(text, left, top, width, height,
/// confidence)` entry per detected word, in engine-native reading order.
/// Coordinates are in the pixel space of the image passed in.
pub trait OcrProvider {
    /// Run OCR over `image`.
    ///
    /// # Errors
    ///
    /// Implementation-defined; errors propagate to the engine caller as-is.
    fn recognize(&self, image: &DynamicImage) -> Result<RawOcrOutput>;
}

/// PII analyzer collaborator.
///
/// Input is a single text string plus an optional language hint; output is
/// an ordered list of entity spans with character offsets into that string.
pub trait PiiAnalyzer {
    /// Find PII entity spans in `text`.
    ///
    /// # Errors
    ///
    /// Implementation-defined; errors propagate to the engine caller as-is.
    fn analyze(&self, text: &str, language: Option<&str>) -> Result<Vec<TextSpan>>;
}

/// A container that can produce a displayable pixel buffer.
///
/// This is the capability boundary for domain-specific image formats: the
/// DICOM specialization implements this trait instead of subclassing the
/// engine, so new containers plug in without touching the core pipeline.
pub trait ImageSource {
    /// Decode or extract the renderable pixel buffer.
    ///
    /// # Errors
    ///
    /// Decode failures propagate to the engine caller as-is.
    fn pixels(&self) -> Result<DynamicImage>;
}

/// Trivial [`ImageSource`] over an already-decoded raster image.
#[derive(Debug, Clone)]
pub struct RasterSource {
    image: DynamicImage,
}

impl RasterSource {
    /// Wrap a decoded image
    #[inline]
    #[must_use = "image source is created but not used"]
    pub const fn new(image: DynamicImage) -> Self {
        Self { image }
    }
}

impl ImageSource for RasterSource {
    #[inline]
    fn pixels(&self) -> Result<DynamicImage> {
        Ok(self.image.clone())
    }
}
