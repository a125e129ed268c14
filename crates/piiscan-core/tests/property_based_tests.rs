//! Property-Based Tests
//!
//! Invariants of the OCR-to-text bridge, explored with proptest:
//! - A span exactly covering one word's offset range maps back to exactly
//!   that word's rectangle (round-trip)
//! - The offset table always covers the joined text with single-space gaps
//! - Span mapping never panics and never yields more findings than spans

use piiscan_core::{
    map_spans_to_boxes, normalize_ocr, reconstruct_text, RawOcrOutput, Rect, TextSpan, WordBox,
};
use proptest::prelude::*;

/// Strategy: 1..12 non-empty ASCII words with arbitrary small geometry
fn word_boxes() -> impl Strategy<Value = Vec<WordBox>> {
    prop::collection::vec(
        ("[a-zA-Z0-9]{1,12}", 0u32..2000, 0u32..2000, 1u32..300, 1u32..80).prop_map(
            |(text, left, top, width, height)| {
                WordBox::new(text, Rect::new(left, top, width, height), 0.9)
            },
        ),
        1..12,
    )
}

/// Property: a span exactly matching one box's offset range round-trips to
/// that box's rectangle.
#[test]
fn proptest_single_box_round_trip() {
    proptest!(|(boxes in word_boxes(), pick in any::<prop::sample::Index>())| {
        let (_, table) = reconstruct_text(&boxes);
        let entry = table.entries()[pick.index(boxes.len())];
        let span = TextSpan::new(entry.start, entry.end, "PERSON".to_string(), 0.5);

        let findings = map_spans_to_boxes(&[span], &table, &boxes);
        prop_assert_eq!(findings.len(), 1);
        prop_assert_eq!(findings[0].rect, boxes[entry.box_index].rect);
    });
}

/// Property: offset table entries are in order, disjoint, and separated by
/// exactly one character; the last entry ends at the text length.
#[test]
fn proptest_offset_table_covers_text() {
    proptest!(|(boxes in word_boxes())| {
        let (text, table) = reconstruct_text(&boxes);
        let entries = table.entries();
        prop_assert_eq!(entries.len(), boxes.len());

        let mut expected_start = 0usize;
        for (i, e) in entries.iter().enumerate() {
            prop_assert_eq!(e.box_index, i);
            prop_assert_eq!(e.start, expected_start);
            prop_assert_eq!(e.end - e.start, boxes[i].text.chars().count());
            expected_start = e.end + 1;
        }
        prop_assert_eq!(entries.last().unwrap().end, text.chars().count());
    });
}

/// Property: mapping arbitrary spans never panics and yields at most one
/// finding per span.
#[test]
fn proptest_mapping_never_exceeds_span_count() {
    proptest!(|(boxes in word_boxes(),
                raw_spans in prop::collection::vec((0usize..200, 1usize..50), 0..8))| {
        let (_, table) = reconstruct_text(&boxes);
        let spans: Vec<TextSpan> = raw_spans
            .into_iter()
            .map(|(start, len)| TextSpan::new(start, start + len, "ID".to_string(), 0.5))
            .collect();

        let findings = map_spans_to_boxes(&spans, &table, &boxes);
        prop_assert!(findings.len() <= spans.len());
    });
}

/// Property: normalize then reconstruct is insensitive to box count and
/// never fails on well-formed parallel arrays.
#[test]
fn proptest_normalize_well_formed() {
    proptest!(|(words in prop::collection::vec("[a-z]{1,8}", 0..10))| {
        let n = words.len();
        let raw = RawOcrOutput {
            text: words,
            left: vec![0; n],
            top: vec![0; n],
            width: vec![10; n],
            height: vec![10; n],
            conf: vec![0.5; n],
        };
        let boxes = normalize_ocr(&raw).unwrap();
        prop_assert_eq!(boxes.len(), n);
    });
}
