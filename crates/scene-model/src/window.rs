//! Frame-index activity intervals.

use serde::{Deserialize, Serialize};

/// The inclusive `[start, end]` interval of output frame positions during
/// which an element is active. `end = None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameWindow {
    /// First active frame position.
    pub start: u32,
    /// Last active frame position (inclusive), or `None` for no upper bound.
    pub end: Option<u32>,
}

impl FrameWindow {
    /// Active for every frame.
    pub const ALWAYS: FrameWindow = FrameWindow {
        start: 0,
        end: None,
    };

    pub const fn new(start: u32, end: Option<u32>) -> Self {
        Self { start, end }
    }

    /// Closed interval `[start, end]`.
    pub const fn between(start: u32, end: u32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Open-ended interval starting at `start`.
    pub const fn from_start(start: u32) -> Self {
        Self { start, end: None }
    }

    /// Whether the element is active at `pos`. An inverted interval
    /// (`end < start`) is never active.
    pub fn contains(&self, pos: u32) -> bool {
        pos >= self.start && self.end.map_or(true, |end| pos <= end)
    }

    /// Number of active frames, or `None` when open-ended or inverted.
    pub fn len(&self) -> Option<u32> {
        match self.end {
            Some(end) if end >= self.start => Some(end - self.start + 1),
            Some(_) => Some(0),
            None => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Smallest window covering both intervals. Any open end wins.
    pub fn merge(&self, other: &FrameWindow) -> FrameWindow {
        let start = self.start.min(other.start);
        let end = match (self.end, other.end) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        };
        FrameWindow { start, end }
    }
}

impl Default for FrameWindow {
    fn default() -> Self {
        Self::ALWAYS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_window() {
        let w = FrameWindow::between(10, 20);
        assert!(!w.contains(9));
        assert!(w.contains(10));
        assert!(w.contains(20));
        assert!(!w.contains(21));
        assert_eq!(w.len(), Some(11));
    }

    #[test]
    fn test_open_window() {
        let w = FrameWindow::from_start(5);
        assert!(!w.contains(4));
        assert!(w.contains(5));
        assert!(w.contains(u32::MAX));
        assert_eq!(w.len(), None);
    }

    #[test]
    fn test_inverted_window_never_active() {
        let w = FrameWindow::between(20, 10);
        assert!(!w.contains(15));
        assert!(w.is_empty());
    }

    #[test]
    fn test_merge() {
        let a = FrameWindow::between(10, 20);
        let b = FrameWindow::between(5, 30);
        assert_eq!(a.merge(&b), FrameWindow::between(5, 30));

        let open = FrameWindow::from_start(15);
        assert_eq!(a.merge(&open), FrameWindow::new(10, None));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn window() -> impl Strategy<Value = FrameWindow> {
            (0u32..1000, proptest::option::of(0u32..1000))
                .prop_map(|(start, end)| FrameWindow::new(start, end))
        }

        proptest! {
            #[test]
            fn merge_covers_both(a in window(), b in window(), pos in 0u32..1000) {
                let merged = a.merge(&b);
                if a.contains(pos) || b.contains(pos) {
                    prop_assert!(merged.contains(pos));
                }
            }

            #[test]
            fn merge_is_commutative(a in window(), b in window()) {
                prop_assert_eq!(a.merge(&b), b.merge(&a));
            }
        }
    }
}
