//! The verification engine: OCR → text → analyzer → mapped findings.

use crate::config::VerifyConfig;
use crate::overlay::draw_overlay;
use crate::pad::pad_image;
use crate::providers::{ImageSource, OcrProvider, PiiAnalyzer};
use anyhow::Result;
use image::DynamicImage;
use piiscan_core::{
    map_spans_to_boxes, normalize_ocr, reconstruct_text, MappedFinding, PaddedRect, TextSpan,
    WordBox,
};
use tracing::debug;

/// Detection results, before any rendering.
///
/// All coordinates are in original-image space: the padding offset applied
/// before OCR has already been subtracted back out.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Normalized OCR word boxes
    pub ocr: Vec<WordBox>,
    /// Raw analyzer spans over the reconstructed text
    pub spans: Vec<TextSpan>,
    /// Analyzer spans located in image space
    pub findings: Vec<MappedFinding>,
}

/// Everything one verification run produces: a [`Detection`] plus the
/// rendered overlay.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// Copy of the input with a colored hollow rectangle per finding
    pub annotated: DynamicImage,
    /// Normalized OCR word boxes
    pub ocr: Vec<WordBox>,
    /// Raw analyzer spans over the reconstructed text
    pub spans: Vec<TextSpan>,
    /// Analyzer spans located in image space
    pub findings: Vec<MappedFinding>,
}

/// Orchestrates OCR, text reconstruction, PII analysis and span mapping over
/// a single image, rendering a non-destructive overlay for inspection.
///
/// The engine holds no per-call state; `verify` may run concurrently on
/// different images as long as the collaborators themselves are reentrant.
#[derive(Debug, Clone)]
pub struct ImagePiiVerifyEngine<O, A> {
    ocr: O,
    analyzer: A,
    config: VerifyConfig,
}

impl<O: OcrProvider, A: PiiAnalyzer> ImagePiiVerifyEngine<O, A> {
    /// Create an engine with default configuration
    #[inline]
    #[must_use = "engine is created but not used"]
    pub fn new(ocr: O, analyzer: A) -> Self {
        Self::with_config(ocr, analyzer, VerifyConfig::default())
    }

    /// Create an engine with explicit configuration
    #[inline]
    #[must_use = "engine is created but not used"]
    pub const fn with_config(ocr: O, analyzer: A, config: VerifyConfig) -> Self {
        Self {
            ocr,
            analyzer,
            config,
        }
    }

    /// Engine configuration
    #[inline]
    #[must_use = "config reference is returned but not used"]
    pub const fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Run detection over `image` without rendering anything.
    ///
    /// The image is padded by `padding` pixels on all sides before OCR and
    /// every reported coordinate is converted back into original-image
    /// space. Callers that want the overlay use [`Self::verify`]; callers
    /// that only consume findings (evaluation, redaction) stop here and
    /// skip the rendering cost.
    ///
    /// # Errors
    ///
    /// Malformed OCR output (ragged parallel arrays) fails fast; OCR and
    /// analyzer failures propagate unmodified. Empty OCR or analyzer output
    /// is a valid empty outcome, not an error.
    pub fn detect(&self, image: &DynamicImage, padding: u32) -> Result<Detection> {
        let padded = pad_image(image, padding);

        let raw = self.ocr.recognize(&padded)?;
        let boxes = normalize_ocr(&raw)?;
        let (text, table) = reconstruct_text(&boxes);
        debug!(
            words = boxes.len(),
            chars = text.chars().count(),
            "reconstructed page text"
        );

        let spans = self.analyzer.analyze(&text, self.config.language.as_deref())?;
        let mapped = map_spans_to_boxes(&spans, &table, &boxes);
        debug!(spans = spans.len(), findings = mapped.len(), "mapped analyzer spans");

        // Back out of padded space before anything is reported or drawn
        let ocr = boxes
            .into_iter()
            .map(|mut b| {
                b.rect = PaddedRect(b.rect).unpad(padding);
                b
            })
            .collect::<Vec<_>>();
        let findings = mapped
            .into_iter()
            .map(|mut f| {
                f.rect = PaddedRect(f.rect).unpad(padding);
                f
            })
            .collect::<Vec<_>>();

        Ok(Detection {
            ocr,
            spans,
            findings,
        })
    }

    /// Run the full verification pipeline over `image` and render the
    /// overlay.
    ///
    /// The input image is never mutated; the annotated copy carries the
    /// overlay.
    ///
    /// # Errors
    ///
    /// As for [`Self::detect`].
    pub fn verify(&self, image: &DynamicImage, padding: u32) -> Result<VerifyOutcome> {
        let detection = self.detect(image, padding)?;
        let annotated = draw_overlay(image, &detection.findings);

        Ok(VerifyOutcome {
            annotated,
            ocr: detection.ocr,
            spans: detection.spans,
            findings: detection.findings,
        })
    }

    /// Decode `source` and verify it with the configured padding width.
    ///
    /// # Errors
    ///
    /// Source decode failures and pipeline errors propagate as in
    /// [`Self::verify`].
    pub fn verify_source<S: ImageSource>(&self, source: &S) -> Result<VerifyOutcome> {
        let image = source.pixels()?;
        self.verify(&image, self.config.padding_width)
    }
}
