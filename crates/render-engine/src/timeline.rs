//! Ordered element stacks with derived bounds and fill.

use std::path::PathBuf;

use inlay_common::Color;
use inlay_layout_core::{aggregate_window, bounding_rect};
use inlay_scene_model::{ElementReport, FrameWindow, Rect};

use crate::element::Element;
use crate::frame::Frame;

/// One element plus the label the timeline assigned it.
#[derive(Debug)]
struct Entry {
    label: String,
    element: Element,
}

/// An ordered stack of overlay elements.
///
/// Insertion order is paint order: later elements draw over earlier
/// ones wherever they overlap. The timeline derives its bounding
/// rectangle and active span from its elements as they are appended.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: Vec<Entry>,
    fill: Option<Color>,
    bounds: Option<Rect>,
    span: Option<FrameWindow>,
    counter: u32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timeline that paints its bounding rectangle with `color`
    /// before drawing elements.
    pub fn with_fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn set_fill(&mut self, fill: Option<Color>) {
        self.fill = fill;
    }

    /// Append an element and return the label assigned to it.
    ///
    /// Labels are `<kind>.<n>` with `n` counting every append on this
    /// timeline, so a mixed sequence stays globally ordered.
    pub fn append(&mut self, element: Element) -> String {
        let label = format!("{}.{}", element.kind(), self.counter);
        self.counter += 1;
        tracing::info!(
            label,
            kind = element.kind(),
            rect = ?element.rect(),
            window = ?element.window(),
            "Appended element"
        );
        self.entries.push(Entry {
            label: label.clone(),
            element,
        });

        let rects: Vec<Rect> = self.entries.iter().map(|e| e.element.rect()).collect();
        self.bounds = bounding_rect(&rects);
        let windows: Vec<FrameWindow> = self.entries.iter().map(|e| e.element.window()).collect();
        self.span = aggregate_window(&windows);

        label
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.entries.iter().map(|e| &e.element)
    }

    /// Look an element up by its assigned label.
    pub fn get(&self, label: &str) -> Option<&Element> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| &e.element)
    }

    /// Union of every element rectangle, or `None` while empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Merged activity window of every element, or `None` while empty.
    pub fn span(&self) -> Option<FrameWindow> {
        self.span
    }

    /// Composite the timeline onto a frame at position `pos`: fill
    /// first (when set), then every element in insertion order.
    pub fn composite(&self, frame: &mut Frame, pos: u32) {
        self.composite_offset(frame, pos, 0, 0);
    }

    pub(crate) fn composite_offset(&self, frame: &mut Frame, pos: u32, dx: i64, dy: i64) {
        if let (Some(color), Some(bounds)) = (self.fill, self.bounds) {
            let shifted = Rect::new(bounds.top + dy, bounds.left + dx, bounds.width, bounds.height);
            frame.fill_rect(&shifted, color);
        }
        for entry in &self.entries {
            entry.element.edit_offset(frame, pos, dx, dy);
        }
    }

    /// Composite one position onto a copy of `frame`, leaving the
    /// original untouched.
    pub fn snapshot(&self, frame: &Frame, pos: u32) -> Frame {
        let mut out = frame.clone();
        self.composite(&mut out, pos);
        out
    }

    /// Every clip audio source with its absolute start position.
    pub(crate) fn audio_clips(&self) -> Vec<(PathBuf, u32)> {
        let mut out = Vec::new();
        for element in self.elements() {
            element.audio_clips(0, &mut out);
        }
        out
    }

    /// Per-element rows for the render report.
    pub fn reports(&self) -> Vec<ElementReport> {
        self.entries
            .iter()
            .map(|e| ElementReport {
                label: e.label.clone(),
                kind: e.element.kind().to_string(),
                rect: e.element.rect(),
                window: e.element.window(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use inlay_scene_model::Layout;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for px in img.pixels_mut() {
            *px = Rgba(rgba);
        }
        img
    }

    fn image_at(top: i64, left: i64, width: u32, height: u32, rgba: [u8; 4]) -> Element {
        Element::image_from(
            solid(width, height, rgba),
            Layout::at(top, left),
            FrameWindow::ALWAYS,
        )
    }

    #[test]
    fn labels_count_across_kinds() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.append(image_at(0, 0, 1, 1, [0, 0, 0, 255])), "image.0");
        assert_eq!(timeline.append(image_at(0, 0, 1, 1, [0, 0, 0, 255])), "image.1");

        let mut inner = Timeline::new();
        inner.append(image_at(0, 0, 1, 1, [0, 0, 0, 255]));
        let nested = Element::nested(inner, Layout::at(0, 0), FrameWindow::ALWAYS).unwrap();
        assert_eq!(timeline.append(nested), "timeline.2");

        assert!(timeline.get("image.1").is_some());
        assert!(timeline.get("image.9").is_none());
    }

    #[test]
    fn bounds_are_the_union_of_element_rects() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.bounds(), None);

        timeline.append(image_at(2, 3, 4, 4, [0, 0, 0, 255]));
        assert_eq!(timeline.bounds(), Some(Rect::new(2, 3, 4, 4)));

        timeline.append(image_at(10, 0, 2, 2, [0, 0, 0, 255]));
        let bounds = timeline.bounds().unwrap();
        assert_eq!((bounds.top, bounds.left), (2, 0));
        assert_eq!((bounds.bottom(), bounds.right()), (12, 7));
    }

    #[test]
    fn span_merges_element_windows() {
        let mut timeline = Timeline::new();
        timeline.append(Element::image_from(
            solid(1, 1, [0, 0, 0, 255]),
            Layout::at(0, 0),
            FrameWindow::between(5, 9),
        ));
        timeline.append(Element::image_from(
            solid(1, 1, [0, 0, 0, 255]),
            Layout::at(0, 0),
            FrameWindow::between(2, 4),
        ));
        assert_eq!(timeline.span(), Some(FrameWindow::between(2, 9)));
    }

    #[test]
    fn later_elements_paint_over_earlier_ones() {
        let mut timeline = Timeline::new();
        timeline.append(image_at(0, 0, 4, 4, [100, 0, 0, 255]));
        timeline.append(image_at(2, 2, 4, 4, [0, 100, 0, 255]));

        let mut frame = Frame::new(8, 8);
        timeline.composite(&mut frame, 0);

        assert_eq!(frame.pixel(3, 3), Some([0, 100, 0]));
        assert_eq!(frame.pixel(1, 1), Some([0, 0, 100]));
        assert_eq!(frame.pixel(7, 7), Some([0, 0, 0]));
    }

    #[test]
    fn fill_paints_the_bounding_rect_under_elements() {
        let mut timeline = Timeline::with_fill(Color::rgb(200, 0, 0));
        timeline.append(image_at(1, 1, 2, 2, [0, 0, 255, 255]));
        timeline.append(image_at(1, 5, 2, 2, [0, 0, 255, 255]));

        let mut frame = Frame::new(10, 10);
        timeline.composite(&mut frame, 0);

        // The gap between the two images sits inside the bounds.
        assert_eq!(frame.pixel(4, 1), Some([0, 0, 200]));
        // Elements draw over the fill.
        assert_eq!(frame.pixel(1, 1), Some([255, 0, 0]));
        // Outside the bounding rect the frame is untouched.
        assert_eq!(frame.pixel(8, 8), Some([0, 0, 0]));
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn fill_without_elements_paints_nothing() {
        let timeline = Timeline::with_fill(Color::WHITE);
        let mut frame = Frame::new(4, 4);
        let before = frame.clone();
        timeline.composite(&mut frame, 0);
        assert_eq!(frame, before);
    }

    #[test]
    fn snapshot_leaves_the_input_frame_untouched() {
        let mut timeline = Timeline::new();
        timeline.append(image_at(0, 0, 2, 2, [9, 9, 9, 255]));

        let frame = Frame::new(4, 4);
        let shot = timeline.snapshot(&frame, 0);
        assert_eq!(frame, Frame::new(4, 4));
        assert_eq!(shot.pixel(0, 0), Some([9, 9, 9]));
    }

    #[test]
    fn reports_mirror_entries_in_order() {
        let mut timeline = Timeline::new();
        timeline.append(Element::image_from(
            solid(2, 2, [0, 0, 0, 255]),
            Layout::at(4, 5),
            FrameWindow::between(1, 3),
        ));
        let reports = timeline.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].label, "image.0");
        assert_eq!(reports[0].kind, "image");
        assert_eq!(reports[0].rect, Rect::new(4, 5, 2, 2));
        assert_eq!(reports[0].window, FrameWindow::between(1, 3));
    }
}
