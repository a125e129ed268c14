//! Normalization of engine-native OCR output into a uniform word-box list.

use crate::error::{CoreError, Result};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Raw OCR engine output: one entry per detected word, as parallel arrays.
///
/// This mirrors the native output shape of word-level OCR engines (tesseract
/// `image_to_data` and friends) and is the input contract of
/// [`normalize_ocr`]. Every array must have exactly one entry per word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOcrOutput {
    /// Recognized word text
    pub text: Vec<String>,
    /// Left edge of each word box
    pub left: Vec<u32>,
    /// Top edge of each word box
    pub top: Vec<u32>,
    /// Width of each word box
    pub width: Vec<u32>,
    /// Height of each word box
    pub height: Vec<u32>,
    /// Recognition confidence per word (0.0 to 1.0)
    pub conf: Vec<f32>,
}

/// A single OCR word with its bounding box and recognition confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordBox {
    /// The recognized word
    pub text: String,
    /// Bounding box in the pixel space of the image OCR ran over
    pub rect: Rect,
    /// Recognition confidence (0.0 to 1.0)
    pub confidence: f32,
}

impl WordBox {
    /// Create a new word box
    #[inline]
    #[must_use = "word box is created but not used"]
    pub const fn new(text: String, rect: Rect, confidence: f32) -> Self {
        Self {
            text,
            rect,
            confidence,
        }
    }
}

/// Convert raw parallel-array OCR output into an ordered list of [`WordBox`].
///
/// Order is preserved exactly as emitted by the engine (reading order,
/// left-to-right top-to-bottom, is assumed and never re-derived here).
/// Empty output is valid and yields an empty list.
///
/// # Errors
///
/// Returns [`CoreError::MalformedInput`] when any parallel array disagrees
/// in length with `text`. No partial result is produced.
pub fn normalize_ocr(raw: &RawOcrOutput) -> Result<Vec<WordBox>> {
    let n = raw.text.len();
    check_len("left", raw.left.len(), n)?;
    check_len("top", raw.top.len(), n)?;
    check_len("width", raw.width.len(), n)?;
    check_len("height", raw.height.len(), n)?;
    check_len("conf", raw.conf.len(), n)?;

    let boxes = (0..n)
        .map(|i| {
            WordBox::new(
                raw.text[i].clone(),
                Rect::new(raw.left[i], raw.top[i], raw.width[i], raw.height[i]),
                raw.conf[i],
            )
        })
        .collect();

    Ok(boxes)
}

fn check_len(field: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(CoreError::MalformedInput {
            field,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_two_words() -> RawOcrOutput {
        RawOcrOutput {
            text: vec!["John".to_string(), "Smith".to_string()],
            left: vec![0, 45],
            top: vec![0, 0],
            width: vec![40, 50],
            height: vec![10, 10],
            conf: vec![0.99, 0.97],
        }
    }

    #[test]
    fn test_normalize_preserves_order() {
        let boxes = normalize_ocr(&raw_two_words()).unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].text, "John");
        assert_eq!(boxes[0].rect, Rect::new(0, 0, 40, 10));
        assert_eq!(boxes[1].text, "Smith");
        assert_eq!(boxes[1].rect, Rect::new(45, 0, 50, 10));
    }

    #[test]
    fn test_normalize_empty_is_valid() {
        let boxes = normalize_ocr(&RawOcrOutput::default()).unwrap();
        assert!(boxes.is_empty());
    }

    #[test]
    fn test_normalize_ragged_fails_fast() {
        let mut raw = raw_two_words();
        raw.height.pop();
        let err = normalize_ocr(&raw).unwrap_err();
        match err {
            CoreError::MalformedInput {
                field,
                expected,
                actual,
            } => {
                assert_eq!(field, "height");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
        }
    }
}
