//! End-to-end pipeline tests over the public API: OCR stub -> reconstructed
//! text -> analyzer stub -> mapped findings -> tolerance matching -> metrics.

use anyhow::Result;
use image::{DynamicImage, Rgb, RgbImage};
use piiscan_core::{RawOcrOutput, TextSpan};
use piiscan_engine::{ImagePiiVerifyEngine, OcrProvider, PiiAnalyzer};
use piiscan_eval::{EvaluationEngine, GroundTruthBox};

const PADDING: u32 = 25;
const TOLERANCE: u32 = 10;

struct StaticOcr(RawOcrOutput);

impl OcrProvider for StaticOcr {
    fn recognize(&self, _image: &DynamicImage) -> Result<RawOcrOutput> {
        Ok(self.0.clone())
    }
}

struct StaticAnalyzer(Vec<TextSpan>);

impl PiiAnalyzer for StaticAnalyzer {
    fn analyze(&self, _text: &str, _language: Option<&str>) -> Result<Vec<TextSpan>> {
        Ok(self.0.clone())
    }
}

fn blank_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 200, Rgb([255, 255, 255])))
}

fn gt(label: &str, left: u32, top: u32, width: u32, height: u32) -> GroundTruthBox {
    GroundTruthBox {
        label: label.to_string(),
        left,
        top,
        width,
        height,
    }
}

/// A page reading "John Smith DOB 01/01/1970", with a PERSON span over the
/// name and a DATE_TIME span over the date. Coordinates are in padded space
/// for `PADDING`.
fn page_engine() -> EvaluationEngine<StaticOcr, StaticAnalyzer> {
    let raw = RawOcrOutput {
        text: vec![
            "John".to_string(),
            "Smith".to_string(),
            "DOB".to_string(),
            "01/01/1970".to_string(),
        ],
        left: vec![25, 70, 25, 65],
        top: vec![25, 25, 45, 45],
        width: vec![40, 50, 30, 90],
        height: vec![10, 10, 10, 10],
        conf: vec![0.99, 0.98, 0.97, 0.96],
    };
    // Reconstructed text: "John Smith DOB 01/01/1970"
    //                      0    5     11  15        25
    let spans = vec![
        TextSpan::new(0, 10, "PERSON".to_string(), 0.9),
        TextSpan::new(15, 25, "DATE_TIME".to_string(), 0.8),
    ];
    EvaluationEngine::new(ImagePiiVerifyEngine::new(
        StaticOcr(raw),
        StaticAnalyzer(spans),
    ))
}

#[test]
fn test_verify_maps_both_entities_to_original_space() {
    let engine = page_engine();
    let outcome = engine
        .verify_engine()
        .verify(&blank_image(), PADDING)
        .unwrap();

    assert_eq!(outcome.findings.len(), 2);

    let person = &outcome.findings[0];
    assert_eq!(person.entity, "PERSON");
    let r = person.rect;
    assert_eq!((r.left, r.top, r.right(), r.bottom()), (0, 0, 95, 10));

    let date = &outcome.findings[1];
    assert_eq!(date.entity, "DATE_TIME");
    let r = date.rect;
    assert_eq!((r.left, r.top, r.right(), r.bottom()), (40, 20, 130, 30));
}

#[test]
#[allow(clippy::float_cmp)]
fn test_eval_perfect_run_matches_contract() {
    let engine = page_engine();
    let truth = vec![gt("PERSON", 0, 0, 95, 10), gt("DATE_TIME", 40, 20, 90, 10)];

    let (_, summary) = engine
        .eval(&blank_image(), &truth, PADDING, TOLERANCE, false)
        .unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "all_positives": 2,
            "ground_truth": 2,
            "precision": 1.0,
            "recall": 1.0
        })
    );
}

#[test]
#[allow(clippy::float_cmp)]
fn test_eval_spurious_detection_lowers_precision() {
    let engine = page_engine();
    // Only the person was annotated; the date finding is a false positive
    let truth = vec![gt("PERSON", 0, 0, 95, 10)];

    let (_, summary) = engine
        .eval(&blank_image(), &truth, PADDING, TOLERANCE, false)
        .unwrap();
    assert_eq!(summary.all_positives, 2);
    assert_eq!(summary.precision, 0.5);
    assert_eq!(summary.recall, 1.0);
}

#[test]
#[allow(clippy::float_cmp)]
fn test_eval_against_unrelated_truth_scores_zero() {
    let engine = page_engine();
    let truth = vec![gt("PERSON", 250, 180, 30, 10)];

    let (_, summary) = engine
        .eval(&blank_image(), &truth, PADDING, TOLERANCE, false)
        .unwrap();
    assert_eq!(summary.precision, 0.0);
    assert_eq!(summary.recall, 0.0);
}

#[test]
fn test_eval_is_repeatable() {
    let engine = page_engine();
    let truth = vec![gt("PERSON", 0, 0, 95, 10), gt("DATE_TIME", 40, 20, 90, 10)];
    let img = blank_image();

    let (_, first) = engine.eval(&img, &truth, PADDING, TOLERANCE, false).unwrap();
    let (_, second) = engine.eval(&img, &truth, PADDING, TOLERANCE, false).unwrap();
    assert_eq!(first, second);
}
