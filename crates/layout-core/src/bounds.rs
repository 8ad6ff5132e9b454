//! Aggregation of element geometry into timeline-level bounds.
//!
//! A timeline derives two things from its elements: the bounding rectangle
//! (min top, max right, max bottom, min left) used when no explicit output
//! size is given, and the aggregate activity span. Both recompute on every
//! append.

use inlay_scene_model::{FrameWindow, Rect};

/// Smallest rectangle covering every given rectangle, or `None` for an
/// empty input.
pub fn bounding_rect<'a, I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    rects
        .into_iter()
        .fold(None, |acc: Option<Rect>, r| match acc {
            Some(prev) => Some(prev.union(r)),
            None => Some(*r),
        })
}

/// Smallest window covering every given window, or `None` for an empty
/// input. Any open-ended member makes the aggregate open-ended.
pub fn aggregate_window<'a, I>(windows: I) -> Option<FrameWindow>
where
    I: IntoIterator<Item = &'a FrameWindow>,
{
    windows
        .into_iter()
        .fold(None, |acc: Option<FrameWindow>, w| match acc {
            Some(prev) => Some(prev.merge(w)),
            None => Some(*w),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(bounding_rect([]), None);
        assert_eq!(aggregate_window([]), None);
    }

    #[test]
    fn test_single_rect_is_its_own_bound() {
        let r = Rect::new(5, 6, 7, 8);
        assert_eq!(bounding_rect([&r]), Some(r));
    }

    #[test]
    fn test_bounding_takes_extremes() {
        let a = Rect::new(10, 40, 20, 20); // right 60, bottom 30
        let b = Rect::new(0, 50, 30, 10); // right 80, bottom 10
        let c = Rect::new(25, 45, 5, 50); // right 50, bottom 75
        let bound = bounding_rect([&a, &b, &c]).unwrap();
        assert_eq!(bound.top, 0);
        assert_eq!(bound.left, 40);
        assert_eq!(bound.right(), 80);
        assert_eq!(bound.bottom(), 75);
    }

    #[test]
    fn test_aggregate_window_spans() {
        let a = FrameWindow::between(10, 20);
        let b = FrameWindow::between(0, 15);
        assert_eq!(aggregate_window([&a, &b]), Some(FrameWindow::between(0, 20)));

        let open = FrameWindow::from_start(30);
        assert_eq!(
            aggregate_window([&a, &open]),
            Some(FrameWindow::new(10, None))
        );
    }
}
