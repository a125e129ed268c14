//! Non-destructive verification overlays.

use image::{DynamicImage, Rgb};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as DrawRect;
use piiscan_core::MappedFinding;

/// Fixed overlay palette; entity labels hash into it so a given label always
/// draws in the same color within and across runs.
const PALETTE: [[u8; 3]; 8] = [
    [220, 20, 60],  // crimson
    [0, 128, 0],    // green
    [30, 100, 220], // blue
    [255, 140, 0],  // orange
    [148, 0, 211],  // violet
    [0, 160, 160],  // teal
    [200, 160, 0],  // gold
    [255, 20, 147], // pink
];

/// Stable color for an entity label.
#[must_use = "overlay color is computed but not used"]
pub fn color_for_entity(entity: &str) -> Rgb<u8> {
    let hash = entity
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    Rgb(PALETTE[hash % PALETTE.len()])
}

/// Draw hollow rectangles over each finding, one color per entity label.
///
/// Returns a new image; pixels outside the rectangle outlines are untouched
/// and the input image is never mutated. Degenerate (zero-area) findings are
/// skipped.
#[must_use = "annotated image is returned but not used"]
pub fn draw_overlay(image: &DynamicImage, findings: &[MappedFinding]) -> DynamicImage {
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
        draw_hollow_rect_mut(&mut canvas, draw_rect, color_for_entity(&finding.entity));
    }

    DynamicImage::ImageRgb8(canvas)
}
