//! DICOM verify/eval engine.

use crate::pixels::DicomSource;
use anyhow::Result;
use dicom_object::mem::InMemDicomObject;
use image::DynamicImage;
use piiscan_engine::{ImagePiiVerifyEngine, ImageSource, OcrProvider, PiiAnalyzer, VerifyOutcome};
use piiscan_eval::{EvaluationEngine, EvaluationSummary, GroundTruthBox};

/// Verification and evaluation over DICOM instances.
///
/// A thin delegation layer: the pixel payload is extracted through
/// [`DicomSource`] and everything else runs through the generic engines.
/// Coordinates in every outcome are in the unpadded pixel buffer's space.
#[derive(Debug, Clone)]
pub struct DicomPiiVerifyEngine<O, A> {
    eval_engine: EvaluationEngine<O, A>,
}

impl<O: OcrProvider, A: PiiAnalyzer> DicomPiiVerifyEngine<O, A> {
    /// Create an engine from OCR and analyzer collaborators
    #[inline]
    #[must_use = "engine is created but not used"]
    pub fn new(ocr: O, analyzer: A) -> Self {
        Self {
            eval_engine: EvaluationEngine::new(ImagePiiVerifyEngine::new(ocr, analyzer)),
        }
    }

    /// Run the verification pipeline over a loaded DICOM instance.
    ///
    /// # Errors
    ///
    /// Pixel extraction failures and pipeline errors propagate unmodified.
    pub fn verify_instance(&self, obj: &InMemDicomObject, padding: u32) -> Result<VerifyOutcome> {
        let image = DicomSource::new(obj).pixels()?;
        self.eval_engine.verify_engine().verify(&image, padding)
    }

    /// Run detection over a DICOM instance and score it against ground truth.
    ///
    /// The annotated image is returned only when `return_image` is set.
    ///
    /// # Errors
    ///
    /// Pixel extraction failures and pipeline errors propagate unmodified.
    pub fn eval_instance(
        &self,
        obj: &InMemDicomObject,
        ground_truth: &[GroundTruthBox],
        padding: u32,
        tolerance: u32,
        return_image: bool,
    ) -> Result<(Option<DynamicImage>, EvaluationSummary)> {
        let image = DicomSource::new(obj).pixels()?;
        self.eval_engine
            .eval(&image, ground_truth, padding, tolerance, return_image)
    }
}
