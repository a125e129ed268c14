//! Mapping analyzer spans back onto word-box geometry.

use crate::geometry::Rect;
use crate::ocr::WordBox;
use crate::text::{OffsetTable, TextSpan};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A PII finding located in image space.
///
/// The rectangle is the union of every word box whose character range in the
/// reconstructed text intersects the analyzer span. Derived once, never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedFinding {
    /// Entity label from the analyzer (e.g. `PERSON`)
    pub entity: String,
    /// Analyzer confidence score (0.0 to 1.0)
    pub score: f32,
    /// Union bounding rectangle of the contributing word boxes
    pub rect: Rect,
}

/// Locate each analyzer span in image space.
///
/// For every span, the word boxes whose offset range overlaps `[start, end)`
/// are selected and their rectangles unioned into a single bounding
/// rectangle: one finding per span, regardless of how many word runs the
/// span touches. A span that overlaps no box (stale offsets, empty words)
/// yields no finding; it is logged and skipped, not an error.
///
/// `table` and `boxes` must come from the same [`reconstruct_text`] call —
/// the table's box indices point into `boxes`.
///
/// [`reconstruct_text`]: crate::text::reconstruct_text
#[must_use = "mapped findings are returned but not used"]
pub fn map_spans_to_boxes(
    spans: &[TextSpan],
    table: &OffsetTable,
    boxes: &[WordBox],
) -> Vec<MappedFinding> {
    let mut findings = Vec::with_capacity(spans.len());

    for span in spans {
        let indices = table.boxes_in_range(span.start, span.end);
        let mut rects = indices.iter().map(|&i| boxes[i].rect);

        let Some(first) = rects.next() else {
            debug!(
                entity = %span.entity,
                start = span.start,
                end = span.end,
                "analyzer span overlaps no word box, skipping"
            );
            continue;
        };

        let rect = rects.fold(first, |acc, r| acc.union(&r));
        findings.push(MappedFinding {
            entity: span.entity.clone(),
            score: span.score,
            rect,
        });
    }

    findings
}
