//! Full-page text reconstruction and the character-offset table.
//!
//! The analyzer works over one contiguous string, while OCR emits discrete
//! word boxes. The join is a lossy many-to-one mapping, so the bridge back
//! is kept explicit: an ordered table of `(box index, start, end)` records
//! where every word landed in the joined string. Span-to-box lookup is then
//! a deterministic range query, never a string search.
//!
//! Offsets count characters, not bytes — the analyzer contract measures
//! spans in characters and OCR text is not guaranteed to be ASCII.

use crate::ocr::WordBox;
use serde::{Deserialize, Serialize};

/// Separator inserted between consecutive OCR words in the joined text.
const WORD_SEPARATOR: char = ' ';

/// Character-offset span of one word box inside the reconstructed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetEntry {
    /// Index into the word-box list this entry was built from
    pub box_index: usize,
    /// First character of the word in the joined string
    pub start: usize,
    /// One past the last character of the word
    pub end: usize,
}

/// Ordered offset table: one entry per word box, in box order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetTable {
    entries: Vec<OffsetEntry>,
}

impl OffsetTable {
    /// Entries in box order
    #[inline]
    #[must_use = "entries are returned but not used"]
    pub fn entries(&self) -> &[OffsetEntry] {
        &self.entries
    }

    /// Number of entries
    #[inline]
    #[must_use = "entry count is returned but not used"]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[inline]
    #[must_use = "emptiness check result is returned but not used"]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indices of word boxes whose offset range overlaps `[start, end)`.
    ///
    /// Overlap is half-open: `entry.start < end && entry.end > start`.
    /// Zero-length entries (empty OCR words) never overlap anything.
    #[must_use = "overlapping box indices are returned but not used"]
    pub fn boxes_in_range(&self, start: usize, end: usize) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| e.start < end && e.end > start)
            .map(|e| e.box_index)
            .collect()
    }
}

/// A PII entity span over the reconstructed text, as returned by an analyzer.
///
/// Offsets are character counts into the joined string produced by
/// [`reconstruct_text`]. Invariant: `start < end <= text length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// First character of the entity
    pub start: usize,
    /// One past the last character of the entity
    pub end: usize,
    /// Entity label (e.g. `PERSON`, `DATE_TIME`)
    pub entity: String,
    /// Analyzer confidence score (0.0 to 1.0)
    pub score: f32,
}

impl TextSpan {
    /// Create a new text span
    #[inline]
    #[must_use = "text span is created but not used"]
    pub const fn new(start: usize, end: usize, entity: String, score: f32) -> Self {
        Self {
            start,
            end,
            entity,
            score,
        }
    }
}

/// Join word texts with a single space, recording each word's character
/// offsets in the result.
///
/// Empty input yields an empty string and an empty table. The table always
/// has exactly one entry per input box, including boxes whose recognized
/// text is empty (those get a zero-length range and can never be selected
/// by a span).
#[must_use = "reconstructed text and offset table are returned but not used"]
pub fn reconstruct_text(boxes: &[WordBox]) -> (String, OffsetTable) {
    let mut text = String::new();
    let mut entries = Vec::with_capacity(boxes.len());
    let mut cursor = 0usize;

    for (box_index, word) in boxes.iter().enumerate() {
        if box_index > 0 {
            text.push(WORD_SEPARATOR);
            cursor += 1;
        }
        let len = word.text.chars().count();
        entries.push(OffsetEntry {
            box_index,
            start: cursor,
            end: cursor + len,
        });
        text.push_str(&word.text);
        cursor += len;
    }

    (text, OffsetTable { entries })
}
