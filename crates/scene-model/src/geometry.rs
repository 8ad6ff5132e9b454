//! Pixel-space rectangles and margins for element placement.
//!
//! Coordinates are signed frame pixels: `(0, 0)` is the top-left corner of
//! the output frame, and negative values mean an element hangs off the edge.

use inlay_common::{InlayError, InlayResult};
use serde::{Deserialize, Serialize};

/// A placement axis. Vertical runs top-to-bottom, horizontal left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// An axis-aligned rectangle in frame pixel space.
///
/// `right` and `bottom` are derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top edge.
    pub top: i64,
    /// Left edge.
    pub left: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    pub const fn new(top: i64, left: i64, width: u32, height: u32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Right edge (exclusive): `left + width`.
    pub fn right(&self) -> i64 {
        self.left + self.width as i64
    }

    /// Bottom edge (exclusive): `top + height`.
    pub fn bottom(&self) -> i64 {
        self.top + self.height as i64
    }

    /// The edge at the lower (top/left) end of an axis.
    pub fn lower_edge(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// The edge at the upper (bottom/right) end of an axis.
    pub fn upper_edge(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Horizontal => self.right(),
            Axis::Vertical => self.bottom(),
        }
    }

    /// Extent along an axis.
    pub fn size(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a pixel lies within this rectangle.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let top = self.top.min(other.top);
        let left = self.left.min(other.left);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect {
            top,
            left,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        }
    }

    /// Overlapping region, or `None` when the rectangles are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            top,
            left,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// Four non-negative offsets around a rectangle.
///
/// Margins are consulted only when a position is resolved relative to
/// another rectangle; they never change an element's own size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    pub const ZERO: Margin = Margin {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };

    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same offset on all four sides.
    pub const fn uniform(v: u32) -> Self {
        Self::new(v, v, v, v)
    }

    /// CSS-style shorthand expansion:
    /// one value sets all sides; two set (top/bottom, left/right);
    /// three set (top, left/right, bottom); four set (top, right, bottom,
    /// left).
    pub fn from_values(values: &[u32]) -> InlayResult<Self> {
        match *values {
            [all] => Ok(Self::uniform(all)),
            [tb, lr] => Ok(Self::new(tb, lr, tb, lr)),
            [t, lr, b] => Ok(Self::new(t, lr, b, lr)),
            [t, r, b, l] => Ok(Self::new(t, r, b, l)),
            _ => Err(InlayError::config(format!(
                "margin shorthand takes 1 to 4 values, got {}",
                values.len()
            ))),
        }
    }

    /// Margin at the lower (top/left) end of an axis.
    pub fn lower(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Margin at the upper (bottom/right) end of an axis.
    pub fn upper(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }
}
