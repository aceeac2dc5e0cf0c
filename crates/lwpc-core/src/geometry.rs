#![forbid(unsafe_code)]

//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// A pixel rectangle relative to a layout container's origin.
///
/// Field order follows the inline style the rect is rendered into
/// (`top`, `left`, `width`, `height`). Values are signed so a rect derived
/// from a not-yet-measured container can be represented without clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Top edge (inclusive).
    pub top: i32,
    /// Left edge (inclusive).
    pub left: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(top: i32, left: i32, width: i32, height: i32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// True when either dimension is zero or negative.
    ///
    /// A container in this state is detached or hidden and must not drive
    /// a layout pass.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, left: i32, top: i32) -> bool {
        left >= self.left && left < self.right() && top >= self.top && top < self.bottom()
    }

    /// Same size, moved to a new origin.
    #[inline]
    #[must_use]
    pub const fn with_origin(self, top: i32, left: i32) -> Self {
        Self::new(top, left, self.width, self.height)
    }

    /// Width clamped to an unsigned pixel count.
    #[inline]
    pub fn width_px(&self) -> u32 {
        u32::try_from(self.width).unwrap_or(0)
    }

    /// Height clamped to an unsigned pixel count.
    #[inline]
    pub fn height_px(&self) -> u32 {
        u32::try_from(self.height).unwrap_or(0)
    }
}
