//! Anchors and per-axis placement rules.
//!
//! A position is resolved per axis from up to two anchors. Each anchor is
//! either a literal pixel coordinate or an [`EdgeRef`]: a snapshot of an
//! already-resolved rectangle plus its margin. Taking snapshots (rather
//! than holding references) forces construction into dependency order, so
//! circular or forward anchoring is unrepresentable.

use crate::geometry::{Axis, Margin, Rect};
use serde::{Deserialize, Serialize};

/// The resolved geometry of another element, captured as an anchor target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRef {
    /// The referenced element's resolved rectangle.
    pub rect: Rect,
    /// The referenced element's margin.
    pub margin: Margin,
}

impl EdgeRef {
    pub const fn new(rect: Rect, margin: Margin) -> Self {
        Self { rect, margin }
    }

    /// Lower edge (top/left) along an axis.
    pub fn lower_edge(&self, axis: Axis) -> i64 {
        self.rect.lower_edge(axis)
    }

    /// Upper edge (bottom/right) along an axis.
    pub fn upper_edge(&self, axis: Axis) -> i64 {
        self.rect.upper_edge(axis)
    }
}

impl From<Rect> for EdgeRef {
    /// A bare rectangle anchors like an element with zero margins.
    fn from(rect: Rect) -> Self {
        Self::new(rect, Margin::ZERO)
    }
}

/// One bound of an axis placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// A literal pixel coordinate.
    At(i64),
    /// The facing edge of another resolved rectangle.
    Edge(EdgeRef),
}

impl From<i64> for Anchor {
    fn from(v: i64) -> Self {
        Anchor::At(v)
    }
}

impl From<i32> for Anchor {
    fn from(v: i32) -> Self {
        Anchor::At(v as i64)
    }
}

impl From<EdgeRef> for Anchor {
    fn from(e: EdgeRef) -> Self {
        Anchor::Edge(e)
    }
}

impl From<Rect> for Anchor {
    fn from(r: Rect) -> Self {
        Anchor::Edge(r.into())
    }
}

/// Where to sit inside the slack between two resolved bounds.
///
/// `(1, 1)` centers. `(1, 3)` puts a quarter of the slack below the lower
/// bound, `(0, 1)` hugs the lower bound, `(1, 0)` hugs the upper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRatio(pub u32, pub u32);

impl SplitRatio {
    pub const CENTER: SplitRatio = SplitRatio(1, 1);

    /// Portion of `slack` allotted below the placed object. A degenerate
    /// `(0, 0)` ratio behaves as centered.
    pub fn apply(&self, slack: i64) -> i64 {
        let sum = self.0 as i64 + self.1 as i64;
        if sum == 0 {
            slack / 2
        } else {
            slack * self.0 as i64 / sum
        }
    }
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self::CENTER
    }
}

/// The placement rule for one axis: up to two anchors plus a split ratio
/// used when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisPlacement {
    /// Anchor for the lower (top/left) edge.
    pub lower: Option<Anchor>,
    /// Anchor for the upper (bottom/right) edge.
    pub upper: Option<Anchor>,
    /// Split ratio between two bounds.
    pub ratio: SplitRatio,
}

impl AxisPlacement {
    /// Pin the lower edge.
    pub fn from_lower(anchor: impl Into<Anchor>) -> Self {
        Self {
            lower: Some(anchor.into()),
            ..Default::default()
        }
    }

    /// Pin the upper edge.
    pub fn from_upper(anchor: impl Into<Anchor>) -> Self {
        Self {
            upper: Some(anchor.into()),
            ..Default::default()
        }
    }

    /// Place between two bounds at the default centered ratio.
    pub fn between(lower: impl Into<Anchor>, upper: impl Into<Anchor>) -> Self {
        Self {
            lower: Some(lower.into()),
            upper: Some(upper.into()),
            ratio: SplitRatio::CENTER,
        }
    }

    /// True when at least one anchor is present; resolution without any
    /// anchor degrades to the warned fallback.
    pub fn is_resolvable(&self) -> bool {
        self.lower.is_some() || self.upper.is_some()
    }
}

/// Full placement rule for an element: both axes plus the element's own
/// margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub horizontal: AxisPlacement,
    pub vertical: AxisPlacement,
    pub margin: Margin,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal top-left placement, the common case.
    pub fn at(top: i64, left: i64) -> Self {
        Self::new().top(top).left(left)
    }

    /// Anchor the top edge.
    pub fn top(mut self, anchor: impl Into<Anchor>) -> Self {
        self.vertical.lower = Some(anchor.into());
        self
    }

    /// Anchor the bottom edge.
    pub fn bottom(mut self, anchor: impl Into<Anchor>) -> Self {
        self.vertical.upper = Some(anchor.into());
        self
    }

    /// Anchor the left edge.
    pub fn left(mut self, anchor: impl Into<Anchor>) -> Self {
        self.horizontal.lower = Some(anchor.into());
        self
    }

    /// Anchor the right edge.
    pub fn right(mut self, anchor: impl Into<Anchor>) -> Self {
        self.horizontal.upper = Some(anchor.into());
        self
    }

    /// Split ratio for the vertical band (used when both top and bottom
    /// are anchored).
    pub fn vertical_ratio(mut self, below: u32, above: u32) -> Self {
        self.vertical.ratio = SplitRatio(below, above);
        self
    }

    /// Split ratio for the horizontal band.
    pub fn horizontal_ratio(mut self, before: u32, after: u32) -> Self {
        self.horizontal.ratio = SplitRatio(before, after);
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Placement rule along an axis.
    pub fn axis(&self, axis: Axis) -> &AxisPlacement {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}
