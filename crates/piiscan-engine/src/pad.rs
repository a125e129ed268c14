//! Image padding for OCR preprocessing.

use image::{imageops, DynamicImage, Rgb, RgbImage};

/// Add a uniform white margin of `padding` pixels on all four sides.
///
/// Returns a new image; the input is never touched. A padding of zero
/// returns an RGB copy of the input.
#[must_use = "padded image is returned but not used"]
pub fn pad_image(image: &DynamicImage, padding: u32) -> DynamicImage {
    let rgb = image.to_rgb8();
    if padding == 0 {
        return DynamicImage::ImageRgb8(rgb);
    }

    let (w, h) = (rgb.width(), rgb.height());
    // White background matches what word-level OCR engines are trained on
    let mut padded = RgbImage::from_pixel(w + 2 * padding, h + 2 * padding, Rgb([255, 255, 255]));
    imageops::overlay(&mut padded, &rgb, i64::from(padding), i64::from(padding));

    DynamicImage::ImageRgb8(padded)
}
