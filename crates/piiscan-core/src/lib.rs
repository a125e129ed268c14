//! Core data model and OCR-to-text bridging for piiscan-rs
//!
//! This crate is the pure data-transform layer of the pipeline. It bridges
//! three heterogeneous coordinate systems:
//!
//! 1. **Pixel space** — word bounding boxes as emitted by an OCR engine
//! 2. **Character-offset space** — spans into a reconstructed full-page text,
//!    as consumed and produced by a PII analyzer
//! 3. **Padded pixel space** — coordinates on an image that was given a
//!    margin before OCR (OCR accuracy improves with a border)
//!
//! # Pipeline
//!
//! ```text
//! raw OCR output ──normalize_ocr──▶ Vec<WordBox>
//!                                        │
//!                              reconstruct_text
//!                                        │
//!                          (full text, OffsetTable)
//!                                        │
//!              analyzer spans ──map_spans_to_boxes──▶ Vec<MappedFinding>
//! ```
//!
//! All intermediate data is local to one call; nothing in this crate holds
//! state across invocations.

pub mod bbox;
pub mod error;
pub mod geometry;
pub mod ocr;
pub mod text;

pub use bbox::{map_spans_to_boxes, MappedFinding};
pub use error::{CoreError, Result};
pub use geometry::{PaddedRect, Rect};
pub use ocr::{normalize_ocr, RawOcrOutput, WordBox};
pub use text::{reconstruct_text, OffsetEntry, OffsetTable, TextSpan};
