//! Per-axis anchor resolution.
//!
//! A placement rule carries up to two anchors per axis. Resolution turns
//! them into the literal lower-edge coordinate (top or left):
//!
//! 1. Each anchor becomes a literal bound. A literal anchor is used as-is.
//!    An edge anchor resolves against the referenced rectangle's facing
//!    edge, stepping over the reference's margin and this object's own
//!    margin on the approaching side.
//! 2. With only a lower bound, the object's lower edge sits on it. With
//!    only an upper bound, the object's upper edge sits on it. With both,
//!    the object sits inside the band at the placement's split ratio.
//! 3. With neither, resolution degrades: a warning is logged and the
//!    coordinate falls back to `0 + own lower margin`.

use inlay_scene_model::{Anchor, Axis, AxisPlacement, Layout, Margin, Rect};

/// Resolve one axis of a placement to the literal lower-edge coordinate.
///
/// `own_size` is the object's extent along `axis`; `own_margin` is
/// consulted when an anchor references another rectangle.
pub fn resolve_axis(
    placement: &AxisPlacement,
    own_size: u32,
    own_margin: &Margin,
    axis: Axis,
) -> i64 {
    let lower = placement
        .lower
        .as_ref()
        .map(|a| resolve_lower_bound(a, own_margin, axis));
    let upper = placement
        .upper
        .as_ref()
        .map(|a| resolve_upper_bound(a, own_margin, axis));

    match (lower, upper) {
        (Some(lo), Some(hi)) => {
            let slack = hi - lo - own_size as i64;
            lo + placement.ratio.apply(slack)
        }
        (Some(lo), None) => lo,
        (None, Some(hi)) => hi - own_size as i64,
        (None, None) => {
            let fallback = own_margin.lower(axis) as i64;
            tracing::warn!(
                ?axis,
                fallback,
                "Cannot resolve position: specify at least one bound"
            );
            fallback
        }
    }
}

/// Resolve both axes of a layout into a rectangle of the given size.
pub fn place(layout: &Layout, width: u32, height: u32) -> Rect {
    let left = resolve_axis(&layout.horizontal, width, &layout.margin, Axis::Horizontal);
    let top = resolve_axis(&layout.vertical, height, &layout.margin, Axis::Vertical);
    Rect {
        top,
        left,
        width,
        height,
    }
}

/// The literal bound an anchor contributes on the lower (top/left) side.
///
/// Anchoring below/right of a reference: the bound is the reference's
/// upper edge pushed out by its upper margin, plus this object's own
/// lower margin.
fn resolve_lower_bound(anchor: &Anchor, own_margin: &Margin, axis: Axis) -> i64 {
    match anchor {
        Anchor::At(v) => *v,
        Anchor::Edge(e) => {
            e.upper_edge(axis) + e.margin.upper(axis) as i64 + own_margin.lower(axis) as i64
        }
    }
}

/// The literal bound an anchor contributes on the upper (bottom/right)
/// side; mirror of [`resolve_lower_bound`].
fn resolve_upper_bound(anchor: &Anchor, own_margin: &Margin, axis: Axis) -> i64 {
    match anchor {
        Anchor::At(v) => *v,
        Anchor::Edge(e) => {
            e.lower_edge(axis) - e.margin.lower(axis) as i64 - own_margin.upper(axis) as i64
        }
    }
}
