//! Evaluation orchestration: verify, match, summarize.

use crate::ground_truth::GroundTruthBox;
use crate::matching::match_findings;
use crate::metrics::{summarize, EvaluationSummary};
use anyhow::Result;
use image::DynamicImage;
use piiscan_engine::{draw_overlay, ImagePiiVerifyEngine, OcrProvider, PiiAnalyzer};

/// Composes the verification engine with ground-truth matching.
///
/// Stateless per call, like the engine it wraps: independent images may be
/// evaluated concurrently.
#[derive(Debug, Clone)]
pub struct EvaluationEngine<O, A> {
    verify_engine: ImagePiiVerifyEngine<O, A>,
}

impl<O: OcrProvider, A: PiiAnalyzer> EvaluationEngine<O, A> {
    /// Wrap a verification engine
    #[inline]
    #[must_use = "engine is created but not used"]
    pub const fn new(verify_engine: ImagePiiVerifyEngine<O, A>) -> Self {
        Self { verify_engine }
    }

    /// The wrapped verification engine
    #[inline]
    #[must_use = "engine reference is returned but not used"]
    pub const fn verify_engine(&self) -> &ImagePiiVerifyEngine<O, A> {
        &self.verify_engine
    }

    /// Run detection over `image` and score it against `ground_truth`.
    ///
    /// The annotated overlay image is rendered only when `return_image` is
    /// set; evaluation runs that discard it skip the rendering pass
    /// entirely.
    ///
    /// # Errors
    ///
    /// Verification errors (OCR, analyzer, malformed OCR output) propagate
    /// unmodified. Empty detection output or empty ground truth is a valid
    /// run that scores zero, not an error.
    #[allow(clippy::cast_possible_truncation)] // annotation counts are tiny
    pub fn eval(
        &self,
        image: &DynamicImage,
        ground_truth: &[GroundTruthBox],
        padding: u32,
        tolerance: u32,
        return_image: bool,
    ) -> Result<(Option<DynamicImage>, EvaluationSummary)> {
        let detection = self.verify_engine.detect(image, padding)?;

        let matches = match_findings(&detection.findings, ground_truth, tolerance);
        let summary = summarize(&matches, ground_truth.len() as u32);

        let annotated = return_image.then(|| draw_overlay(image, &detection.findings));
        Ok((annotated, summary))
    }
}
