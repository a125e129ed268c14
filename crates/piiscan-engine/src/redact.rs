//! Destructive redaction: irreversible occlusion of detected PII regions.

use image::{DynamicImage, Rgb};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as DrawRect;
use piiscan_core::MappedFinding;

/// Paint an opaque filled rectangle over every finding.
///
/// Returns a new image with each finding's region irreversibly obscured by
/// `fill`; pixels outside the rectangles are untouched and the input image
/// is never mutated. Degenerate (zero-area) findings are skipped.
#[must_use = "redacted image is returned but not used"]
pub fn redact(image: &DynamicImage, findings: &[MappedFinding], fill: [u8; 3]) -> DynamicImage {
    let mut canvas = image.to_rgb8();

    for finding in findings {
        let r = finding.rect;
        if r.width == 0 || r.height == 0 {
            continue;
        }
        let draw_rect = DrawRect::at(
            i32::try_from(r.left).unwrap_or(i32::MAX),
            i32::try_from(r.top).unwrap_or(i32::MAX),
        )
        .of_size(r.width, r.height);
        draw_filled_rect_mut(&mut canvas, draw_rect, Rgb(fill));
    }

    DynamicImage::ImageRgb8(canvas)
}
