//! Extraction of a displayable grayscale buffer from a DICOM object.
//!
//! The renderable payload is reproduced from the raw stored samples by
//! applying, in order: the modality rescale (slope/intercept), then the
//! display window (center/width, falling back to the data range when the
//! object carries no window), then MONOCHROME1 inversion. Output is always
//! 8-bit grayscale, which is what word-level OCR engines consume.

use crate::error::{DicomError, Result};
use dicom_object::mem::InMemDicomObject;
use dicom_object::Tag;
use image::{DynamicImage, GrayImage};
use piiscan_engine::ImageSource;
use tracing::debug;

/// Pixel Data (7FE0,0010)
const TAG_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);
/// Rows (0028,0010)
const TAG_ROWS: Tag = Tag(0x0028, 0x0010);
/// Columns (0028,0011)
const TAG_COLUMNS: Tag = Tag(0x0028, 0x0011);
/// Bits Allocated (0028,0100)
const TAG_BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);
/// Pixel Representation (0028,0103): 0 = unsigned, 1 = two's complement
const TAG_PIXEL_REPRESENTATION: Tag = Tag(0x0028, 0x0103);
/// Photometric Interpretation (0028,0004)
const TAG_PHOTOMETRIC: Tag = Tag(0x0028, 0x0004);
/// Rescale Intercept (0028,1052)
const TAG_RESCALE_INTERCEPT: Tag = Tag(0x0028, 0x1052);
/// Rescale Slope (0028,1053)
const TAG_RESCALE_SLOPE: Tag = Tag(0x0028, 0x1053);
/// Window Center (0028,1050)
const TAG_WINDOW_CENTER: Tag = Tag(0x0028, 0x1050);
/// Window Width (0028,1051)
const TAG_WINDOW_WIDTH: Tag = Tag(0x0028, 0x1051);

/// Extract the renderable pixel buffer from a DICOM object.
///
/// Handles 8- and 16-bit grayscale samples, signed and unsigned, with
/// modality rescale and display windowing applied. Multi-frame objects
/// render their first frame. The object itself is never modified.
///
/// # Errors
///
/// Returns [`DicomError::MissingTag`] when Rows, Columns or Pixel Data are
/// absent, and [`DicomError::Pixels`] for sample formats this crate does
/// not interpret (e.g. color payloads) or truncated pixel data.
pub fn extract_pixels(obj: &InMemDicomObject) -> Result<DynamicImage> {
    let rows = get_u16(obj, TAG_ROWS).ok_or(DicomError::MissingTag("Rows (0028,0010)"))?;
    let columns = get_u16(obj, TAG_COLUMNS).ok_or(DicomError::MissingTag("Columns (0028,0011)"))?;
    if rows == 0 || columns == 0 {
        return Err(DicomError::Pixels(format!(
            "degenerate image dimensions {columns}x{rows}"
        )));
    }

    let bits_allocated = get_u16(obj, TAG_BITS_ALLOCATED).unwrap_or(16);
    let signed = get_u16(obj, TAG_PIXEL_REPRESENTATION).unwrap_or(0) == 1;
    let photometric =
        get_string(obj, TAG_PHOTOMETRIC).unwrap_or_else(|| "MONOCHROME2".to_string());
    if !photometric.starts_with("MONOCHROME") {
        return Err(DicomError::Pixels(format!(
            "unsupported photometric interpretation `{photometric}`"
        )));
    }

    let bytes = obj
        .element(TAG_PIXEL_DATA)
        .map_err(|_| DicomError::MissingTag("PixelData (7FE0,0010)"))?
        .to_bytes()
        .map_err(|e| DicomError::Pixels(format!("cannot read pixel data: {e}")))?;

    let pixel_count = usize::from(rows) * usize::from(columns);
    let raw = decode_samples(&bytes, bits_allocated, signed, pixel_count)?;

    // Modality LUT: stored value -> output units
    let slope = get_f64(obj, TAG_RESCALE_SLOPE).unwrap_or(1.0);
    let intercept = get_f64(obj, TAG_RESCALE_INTERCEPT).unwrap_or(0.0);
    let samples: Vec<f64> = raw.iter().map(|&v| v.mul_add(slope, intercept)).collect();

    // Display window, from the object or derived from the data range
    let (center, width) = match (get_f64(obj, TAG_WINDOW_CENTER), get_f64(obj, TAG_WINDOW_WIDTH)) {
        (Some(c), Some(w)) if w > 0.0 => (c, w),
        _ => data_range_window(&samples),
    };
    debug!(rows, columns, bits_allocated, signed, center, width, "windowing DICOM frame");

    let invert = photometric == "MONOCHROME1";
    let pixels = window_to_u8(&samples, center, width, invert);

    let gray = GrayImage::from_raw(u32::from(columns), u32::from(rows), pixels)
        .ok_or_else(|| DicomError::Pixels("pixel buffer does not match dimensions".to_string()))?;
    Ok(DynamicImage::ImageLuma8(gray))
}

/// Decode the first `pixel_count` stored samples as floats.
fn decode_samples(
    bytes: &[u8],
    bits_allocated: u16,
    signed: bool,
    pixel_count: usize,
) -> Result<Vec<f64>> {
    let available = match bits_allocated {
        8 => bytes.len(),
        16 => bytes.len() / 2,
        other => {
            return Err(DicomError::Pixels(format!(
                "unsupported bits allocated: {other}"
            )))
        }
    };
    if available < pixel_count {
        return Err(DicomError::Pixels(format!(
            "pixel data holds {available} samples, image needs {pixel_count}"
        )));
    }

    let samples = match bits_allocated {
        8 => bytes[..pixel_count].iter().map(|&b| f64::from(b)).collect(),
        // 16-bit samples are little-endian in the in-memory representation
        _ => bytes
            .chunks_exact(2)
            .take(pixel_count)
            .map(|c| {
                let v = u16::from_le_bytes([c[0], c[1]]);
                if signed {
                    // Reinterpret as two's complement, preserving the bit pattern
                    #[allow(clippy::cast_possible_wrap)]
                    f64::from(v as i16)
                } else {
                    f64::from(v)
                }
            })
            .collect(),
    };
    Ok(samples)
}

/// Window parameters covering the full data range, for objects without an
/// explicit window. A constant image gets a unit-width window so every
/// sample maps to the same output value without dividing by zero.
fn data_range_window(samples: &[f64]) -> (f64, f64) {
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || max <= min {
        return (min.is_finite().then_some(min).unwrap_or(0.0), 1.0);
    }
    ((min + max) / 2.0, max - min)
}

/// Linear window: map `[center - width/2, center + width/2]` onto 0..=255,
/// clamping outside the window, optionally inverting for MONOCHROME1.
// Truncation/sign loss safe: value is clamped to [0, 255] before the cast
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn window_to_u8(samples: &[f64], center: f64, width: f64, invert: bool) -> Vec<u8> {
    let lo = center - width / 2.0;
    samples
        .iter()
        .map(|&v| {
            let t = ((v - lo) / width).clamp(0.0, 1.0);
            let t = if invert { 1.0 - t } else { t };
            (t * 255.0).round() as u8
        })
        .collect()
}

/// A DICOM object as a pluggable [`ImageSource`] for the generic engines.
#[derive(Debug, Clone, Copy)]
pub struct DicomSource<'a> {
    obj: &'a InMemDicomObject,
}

impl<'a> DicomSource<'a> {
    /// Wrap a loaded DICOM object
    #[inline]
    #[must_use = "image source is created but not used"]
    pub const fn new(obj: &'a InMemDicomObject) -> Self {
        Self { obj }
    }
}

impl ImageSource for DicomSource<'_> {
    #[inline]
    fn pixels(&self) -> anyhow::Result<DynamicImage> {
        Ok(extract_pixels(self.obj)?)
    }
}

/// Get string value for a DICOM tag
#[inline]
fn get_string(obj: &InMemDicomObject, tag: Tag) -> Option<String> {
    obj.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Get u16 value for a DICOM tag
#[inline]
fn get_u16(obj: &InMemDicomObject, tag: Tag) -> Option<u16> {
    obj.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<i32>().ok())
        .and_then(|val| u16::try_from(val).ok())
}

/// Get float value for a DICOM tag.
///
/// Multi-valued elements (window center/width may carry several presets)
/// fall back to the first component.
fn get_f64(obj: &InMemDicomObject, tag: Tag) -> Option<f64> {
    let elem = obj.element(tag).ok()?;
    elem.to_float64().ok().or_else(|| {
        elem.to_str()
            .ok()
            .and_then(|s| s.split('\\').next().and_then(|v| v.trim().parse().ok()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom::core::{DataElement, PrimitiveValue, VR};
    use image::GenericImageView;

    fn monochrome2_8bit(rows: u16, columns: u16, data: Vec<u8>) -> InMemDicomObject {
        let mut obj = InMemDicomObject::new_empty();
        obj.put(DataElement::new(TAG_ROWS, VR::US, PrimitiveValue::from(rows)));
        obj.put(DataElement::new(
            TAG_COLUMNS,
            VR::US,
            PrimitiveValue::from(columns),
        ));
        obj.put(DataElement::new(
            TAG_BITS_ALLOCATED,
            VR::US,
            PrimitiveValue::from(8u16),
        ));
        obj.put(DataElement::new(
            TAG_PHOTOMETRIC,
            VR::CS,
            PrimitiveValue::from("MONOCHROME2"),
        ));
        obj.put(DataElement::new(
            TAG_PIXEL_DATA,
            VR::OB,
            PrimitiveValue::U8(data.into()),
        ));
        obj
    }

    #[test]
    fn test_extract_8bit_monochrome2() {
        let obj = monochrome2_8bit(2, 2, vec![0, 85, 170, 255]);
        let img = extract_pixels(&obj).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        // Full data range maps to the full output range
        assert_eq!(img.to_luma8().get_pixel(0, 0).0[0], 0);
        assert_eq!(img.to_luma8().get_pixel(1, 1).0[0], 255);
    }

    #[test]
    fn test_missing_rows_is_an_error() {
        let mut obj = InMemDicomObject::new_empty();
        obj.put(DataElement::new(
            TAG_COLUMNS,
            VR::US,
            PrimitiveValue::from(2u16),
        ));
        let err = extract_pixels(&obj).unwrap_err();
        assert!(matches!(err, DicomError::MissingTag(_)));
    }

    #[test]
    fn test_truncated_pixel_data_is_an_error() {
        let obj = monochrome2_8bit(2, 2, vec![0, 1]);
        let err = extract_pixels(&obj).unwrap_err();
        assert!(matches!(err, DicomError::Pixels(_)));
    }

    #[test]
    fn test_window_maps_linearly_and_clamps() {
        let out = window_to_u8(&[-100.0, 0.0, 50.0, 100.0, 500.0], 50.0, 100.0, false);
        assert_eq!(out, vec![0, 0, 128, 255, 255]);
    }

    #[test]
    fn test_monochrome1_inverts() {
        let out = window_to_u8(&[0.0, 100.0], 50.0, 100.0, true);
        assert_eq!(out, vec![255, 0]);
    }

    #[test]
    fn test_decode_16bit_signed() {
        // -1 and 1 as little-endian i16
        let bytes = [0xFF, 0xFF, 0x01, 0x00];
        let samples = decode_samples(&bytes, 16, true, 2).unwrap();
        assert_eq!(samples, vec![-1.0, 1.0]);
    }

    #[test]
    fn test_decode_16bit_unsigned() {
        let bytes = [0xFF, 0xFF, 0x01, 0x00];
        let samples = decode_samples(&bytes, 16, false, 2).unwrap();
        assert_eq!(samples, vec![65535.0, 1.0]);
    }

    #[test]
    fn test_constant_image_does_not_divide_by_zero() {
        let obj = monochrome2_8bit(2, 2, vec![7, 7, 7, 7]);
        let img = extract_pixels(&obj).unwrap();
        let v = img.to_luma8().get_pixel(0, 0).0[0];
        // All pixels equal; exact value is irrelevant, finiteness is not
        assert!(img.to_luma8().pixels().all(|p| p.0[0] == v));
    }

    #[test]
    fn test_rescale_and_window_tags_respected() {
        let mut obj = monochrome2_8bit(1, 2, vec![0, 100]);
        obj.put(DataElement::new(
            TAG_RESCALE_SLOPE,
            VR::DS,
            PrimitiveValue::from("2.0"),
        ));
        obj.put(DataElement::new(
            TAG_RESCALE_INTERCEPT,
            VR::DS,
            PrimitiveValue::from("-100.0"),
        ));
        obj.put(DataElement::new(
            TAG_WINDOW_CENTER,
            VR::DS,
            PrimitiveValue::from("0.0"),
        ));
        obj.put(DataElement::new(
            TAG_WINDOW_WIDTH,
            VR::DS,
            PrimitiveValue::from("200.0"),
        ));
        let img = extract_pixels(&obj).unwrap().to_luma8();
        // Stored 0 -> rescaled -100 -> window floor; stored 100 -> +100 -> ceiling
        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert_eq!(img.get_pixel(1, 0).0[0], 255);
    }
}
