//! Axis-aligned rectangles in original and padded pixel space.
//!
//! The verify pipeline pads an image before OCR, so the same rectangle exists
//! in two coordinate systems. Mixing them up is the classic bug in this kind
//! of pipeline, so the padded variant is a distinct type and the only way to
//! move between the two is through the explicit [`Rect::pad`] /
//! [`PaddedRect::unpad`] conversions.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in original-image pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (x)
    pub left: u32,
    /// Top edge (y)
    pub top: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    #[inline]
    #[must_use = "rectangle is created but not used"]
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge coordinate (exclusive).
    ///
    /// Saturates at `u32::MAX`: coordinates come from external input
    /// (OCR output, ground-truth JSON) and must not be able to overflow.
    #[inline]
    #[must_use = "right coordinate is computed but not used"]
    pub const fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }

    /// Bottom edge coordinate (exclusive), saturating at `u32::MAX`.
    #[inline]
    #[must_use = "bottom coordinate is computed but not used"]
    pub const fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    /// Smallest rectangle covering both `self` and `other`
    #[must_use = "union rectangle is computed but not used"]
    pub fn union(&self, other: &Self) -> Self {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Sum of per-edge distances to `other` (left, top, right, bottom).
    ///
    /// Used as the tie-break cost when several ground-truth boxes qualify
    /// for the same predicted finding.
    #[must_use = "edge distance is computed but not used"]
    pub const fn edge_distance(&self, other: &Self) -> u32 {
        self.left.abs_diff(other.left)
            + self.top.abs_diff(other.top)
            + self.right().abs_diff(other.right())
            + self.bottom().abs_diff(other.bottom())
    }

    /// Whether every edge of `self` lies within `tolerance` pixels of the
    /// corresponding edge of `other`.
    ///
    /// This is a per-edge proximity test, not IoU: all four edges must
    /// independently agree within the tolerance window.
    #[must_use = "tolerance check result is returned but not used"]
    pub const fn within_tolerance(&self, other: &Self, tolerance: u32) -> bool {
        self.left.abs_diff(other.left) <= tolerance
            && self.top.abs_diff(other.top) <= tolerance
            && self.right().abs_diff(other.right()) <= tolerance
            && self.bottom().abs_diff(other.bottom()) <= tolerance
    }

    /// Convert into padded-image space by shifting right/down by `padding`.
    #[inline]
    #[must_use = "padded rectangle is computed but not used"]
    pub const fn pad(self, padding: u32) -> PaddedRect {
        PaddedRect(Self {
            left: self.left.saturating_add(padding),
            top: self.top.saturating_add(padding),
            width: self.width,
            height: self.height,
        })
    }
}

/// Axis-aligned rectangle in padded-image pixel space.
///
/// Produced by OCR runs over a padded image; must be converted back with
/// [`PaddedRect::unpad`] before being reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaddedRect(pub Rect);

impl PaddedRect {
    /// Convert back into original-image space by removing the padding offset.
    ///
    /// OCR occasionally places a box edge inside the padding margin; such
    /// coordinates clamp to 0 rather than going negative.
    #[inline]
    #[must_use = "unpadded rectangle is computed but not used"]
    pub const fn unpad(self, padding: u32) -> Rect {
        Rect {
            left: self.0.left.saturating_sub(padding),
            top: self.0.top.saturating_sub(padding),
            width: self.0.width,
            height: self.0.height,
        }
    }
}
