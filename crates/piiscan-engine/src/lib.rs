//! Verification and redaction engines for piiscan-rs
//!
//! This crate orchestrates the pipeline around the pure transforms in
//! `piiscan-core`:
//!
//! 1. Pad the input image (OCR accuracy improves with a margin)
//! 2. Run the OCR collaborator over the padded image
//! 3. Reconstruct the full-page text and run the PII analyzer over it
//! 4. Map analyzer spans back onto word-box geometry
//! 5. Convert all coordinates back into original-image space
//! 6. Render a non-destructive colored overlay (verification) or paint
//!    opaque rectangles (redaction)
//!
//! OCR and analysis are external collaborators behind the [`OcrProvider`]
//! and [`PiiAnalyzer`] traits; their failures propagate unmodified. The
//! engines are stateless per call (`&self` throughout) and never mutate the
//! input image.

pub mod config;
pub mod overlay;
pub mod pad;
pub mod providers;
pub mod redact;
pub mod verify;

pub use config::VerifyConfig;
pub use overlay::{color_for_entity, draw_overlay};
pub use pad::pad_image;
pub use providers::{ImageSource, OcrProvider, PiiAnalyzer, RasterSource};
pub use redact::redact;
pub use verify::{Detection, ImagePiiVerifyEngine, VerifyOutcome};
