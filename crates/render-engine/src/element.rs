//! Overlay elements: constructed from specs, composited per frame.
//!
//! An element resolves its size and position once, at construction.
//! Assets are decoded and cached up front (animations and clips hold
//! every sub-frame in memory), so the per-frame `edit` call is pure
//! pixel placement with no I/O.

use std::path::PathBuf;

use image::codecs::gif::GifDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, RgbaImage};
use inlay_common::{InlayError, InlayResult};
use inlay_layout_core::{loop_index, native_period, place};
use inlay_scene_model::{
    Advance, AnimationSpec, EdgeRef, FrameFilter, FrameWindow, ImageSpec, Layout, Margin, Rect,
    TextSpec, VideoSpec,
};

use crate::composite::{alpha_composite, blit};
use crate::frame::{apply_filter_bgr, BgrPlane, Frame};
use crate::text::{layout_text, render_block, FontHandle};
use crate::timeline::Timeline;
use crate::video_io::{probe_media, FrameReader};

/// Cached overlay pixels in whichever representation compositing
/// needs: a straight BGR copy for opaque sources, RGBA for anything
/// carrying transparency.
#[derive(Debug, Clone)]
enum Pixels {
    Opaque(BgrPlane),
    Blended(RgbaImage),
}

impl Pixels {
    /// Pick the representation by scanning for translucent pixels.
    fn from_rgba(image: RgbaImage) -> Self {
        if image.pixels().any(|p| p.0[3] < 255) {
            Pixels::Blended(image)
        } else {
            Pixels::Opaque(BgrPlane::from_rgba(&image))
        }
    }

    fn draw(&self, frame: &mut Frame, left: i64, top: i64) {
        match self {
            Pixels::Opaque(plane) => blit(frame, plane, left, top),
            Pixels::Blended(image) => alpha_composite(frame, image, left, top),
        }
    }

    fn apply_filter(&mut self, filter: FrameFilter) {
        if matches!(filter, FrameFilter::None) {
            return;
        }
        match self {
            Pixels::Opaque(plane) => plane.apply_filter(filter),
            Pixels::Blended(image) => {
                // Filters run on color channels only; alpha is kept.
                let mut bgr = Vec::with_capacity(image.len() / 4 * 3);
                for px in image.pixels() {
                    bgr.extend_from_slice(&[px.0[2], px.0[1], px.0[0]]);
                }
                apply_filter_bgr(&mut bgr, filter);
                for (px, chunk) in image.pixels_mut().zip(bgr.chunks_exact(3)) {
                    px.0[0] = chunk[2];
                    px.0[1] = chunk[1];
                    px.0[2] = chunk[0];
                }
            }
        }
    }
}

/// Resolve an element's drawn size against its native size.
///
/// One explicit dimension scales the other to preserve aspect ratio;
/// two override it outright.
fn scaled_size(native_w: u32, native_h: u32, width: Option<u32>, height: Option<u32>) -> (u32, u32) {
    let native_w = native_w.max(1);
    let native_h = native_h.max(1);
    match (width, height) {
        (None, None) => (native_w, native_h),
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => {
            let h = (native_h as f64 * w as f64 / native_w as f64).round() as u32;
            (w, h.max(1))
        }
        (None, Some(h)) => {
            let w = (native_w as f64 * h as f64 / native_h as f64).round() as u32;
            (w.max(1), h)
        }
    }
}

fn resize_to(image: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        image
    } else {
        image::imageops::resize(&image, width, height, FilterType::Triangle)
    }
}

/// A still image overlay.
#[derive(Debug, Clone)]
pub struct ImageElement {
    rect: Rect,
    margin: Margin,
    window: FrameWindow,
    pixels: Pixels,
}

impl ImageElement {
    /// Decode, scale, filter, and place an image from disk.
    pub fn open(spec: &ImageSpec) -> InlayResult<Self> {
        let path = InlayError::require_asset(&spec.path)?;
        let decoded = image::open(&path)?.to_rgba8();
        let (w, h) = scaled_size(decoded.width(), decoded.height(), spec.width, spec.height);
        let mut pixels = Pixels::from_rgba(resize_to(decoded, w, h));
        pixels.apply_filter(spec.filter);
        Ok(Self {
            rect: place(&spec.layout, w, h),
            margin: spec.layout.margin,
            window: spec.window,
            pixels,
        })
    }

    /// Place an already-decoded image at its native size.
    pub fn from_rgba(image: RgbaImage, layout: Layout, window: FrameWindow) -> Self {
        let (w, h) = image.dimensions();
        Self {
            rect: place(&layout, w, h),
            margin: layout.margin,
            window,
            pixels: Pixels::from_rgba(image),
        }
    }
}

/// A rasterized text block.
#[derive(Debug)]
pub struct TextElement {
    rect: Rect,
    margin: Margin,
    window: FrameWindow,
    raster: RgbaImage,
    advance: Advance,
    line_height: u32,
    line_count: u32,
    last_line_width: u32,
}

impl TextElement {
    /// Lay out, wrap, and rasterize a text block.
    pub fn new(spec: &TextSpec) -> InlayResult<Self> {
        if !(spec.size > 0.0) {
            return Err(InlayError::config(format!(
                "text size must be positive, got {}",
                spec.size
            )));
        }
        let font = FontHandle::load(&spec.font)?;
        let layout = layout_text(&font, &spec.text, spec.size, spec.wrap, spec.line_height);
        let raster = render_block(&font, &layout, spec.size, spec.color);
        Ok(Self {
            rect: place(&spec.layout, layout.width, layout.height),
            margin: spec.layout.margin,
            window: spec.window,
            raster,
            advance: spec.advance,
            line_height: layout.line_height,
            line_count: layout.lines.len() as u32,
            last_line_width: layout.line_widths.last().copied().unwrap_or(0),
        })
    }

    /// Where a follow-up block would continue: after the last word, or
    /// at the start of the line below the block.
    pub fn next_position(&self) -> (i64, i64) {
        let last_line_top =
            self.rect.top + self.line_count.saturating_sub(1) as i64 * self.line_height as i64;
        match self.advance {
            Advance::Word => (self.rect.left + self.last_line_width as i64, last_line_top),
            Advance::Line => (
                self.rect.left,
                self.rect.top + self.line_count as i64 * self.line_height as i64,
            ),
        }
    }
}

/// A looping animated overlay (GIF frames).
#[derive(Debug, Clone)]
pub struct AnimationElement {
    rect: Rect,
    margin: Margin,
    window: FrameWindow,
    frames: Vec<Pixels>,
    period: u32,
}

impl AnimationElement {
    /// Decode every frame of a GIF and cache it scaled.
    pub fn open(spec: &AnimationSpec) -> InlayResult<Self> {
        let path = InlayError::require_asset(&spec.path)?;
        let file = std::fs::File::open(&path)?;
        let decoder = GifDecoder::new(std::io::BufReader::new(file))?;
        let frames: Vec<RgbaImage> = decoder
            .into_frames()
            .collect_frames()?
            .into_iter()
            .map(|f| f.into_buffer())
            .collect();
        if frames.is_empty() {
            return Err(InlayError::render(format!(
                "animation {} has no frames",
                path.display()
            )));
        }
        Self::build(frames, spec.width, spec.height, spec.period, &spec.layout, spec.window)
    }

    /// Build from already-decoded frames at their native size.
    pub fn from_frames(
        frames: Vec<RgbaImage>,
        period: Option<u32>,
        layout: Layout,
        window: FrameWindow,
    ) -> InlayResult<Self> {
        if frames.is_empty() {
            return Err(InlayError::render("animation has no frames"));
        }
        Self::build(frames, None, None, period, &layout, window)
    }

    fn build(
        frames: Vec<RgbaImage>,
        width: Option<u32>,
        height: Option<u32>,
        period: Option<u32>,
        layout: &Layout,
        window: FrameWindow,
    ) -> InlayResult<Self> {
        let first = &frames[0];
        let (w, h) = scaled_size(first.width(), first.height(), width, height);
        let frames: Vec<Pixels> = frames
            .into_iter()
            .map(|f| Pixels::from_rgba(resize_to(f, w, h)))
            .collect();
        let total = frames.len() as u32;
        Ok(Self {
            rect: place(layout, w, h),
            margin: layout.margin,
            window,
            frames,
            period: period.unwrap_or_else(|| native_period(total)),
        })
    }

    fn frame_at(&self, pos: u32) -> &Pixels {
        let idx = loop_index(pos, self.window.start, self.period, self.frames.len() as u32);
        &self.frames[idx]
    }
}

/// An embedded video clip with every frame cached.
#[derive(Debug, Clone)]
pub struct VideoElement {
    rect: Rect,
    margin: Margin,
    window: FrameWindow,
    frames: Vec<BgrPlane>,
    period: u32,
    audio_source: Option<PathBuf>,
}

impl VideoElement {
    /// Probe and fully decode a clip, scaled to its drawn size.
    pub fn open(spec: &VideoSpec) -> InlayResult<Self> {
        let path = InlayError::require_asset(&spec.path)?;
        let probe = probe_media(&path)?;
        let (w, h) = scaled_size(probe.width, probe.height, spec.width, spec.height);
        let frames: Vec<BgrPlane> = FrameReader::open(&path, w, h)?
            .collect_frames()?
            .into_iter()
            .map(BgrPlane::from)
            .collect();
        if frames.is_empty() {
            return Err(InlayError::render(format!(
                "video {} has no frames",
                path.display()
            )));
        }
        let total = frames.len() as u32;
        tracing::info!(path = %path.display(), frames = total, width = w, height = h, "Cached clip frames");
        Ok(Self {
            rect: place(&spec.layout, w, h),
            margin: spec.layout.margin,
            window: spec.window,
            frames,
            period: spec.period.unwrap_or_else(|| native_period(total)),
            audio_source: spec.audio.then(|| path.clone()),
        })
    }

    fn plane_at(&self, pos: u32) -> &BgrPlane {
        let idx = loop_index(pos, self.window.start, self.period, self.frames.len() as u32);
        &self.frames[idx]
    }
}

/// A timeline embedded as a single element.
#[derive(Debug)]
pub struct NestedElement {
    rect: Rect,
    margin: Margin,
    window: FrameWindow,
    timeline: Timeline,
    /// Top-left of the nested timeline's own bounding rectangle.
    origin: (i64, i64),
}

impl NestedElement {
    /// Place a whole timeline as one element. Its bounding rectangle
    /// decides the drawn size; its elements keep their own windows,
    /// evaluated against positions local to this element's start.
    pub fn new(timeline: Timeline, layout: Layout, window: FrameWindow) -> InlayResult<Self> {
        let bounds = timeline
            .bounds()
            .ok_or_else(|| InlayError::config("nested timeline has no elements"))?;
        Ok(Self {
            rect: place(&layout, bounds.width, bounds.height),
            margin: layout.margin,
            window,
            origin: (bounds.left, bounds.top),
            timeline,
        })
    }
}

/// A single compositing layer of a timeline.
#[derive(Debug)]
pub enum Element {
    Image(ImageElement),
    Text(TextElement),
    Animation(AnimationElement),
    Video(VideoElement),
    Nested(NestedElement),
}

impl Element {
    /// See [`ImageElement::open`].
    pub fn image(spec: &ImageSpec) -> InlayResult<Self> {
        ImageElement::open(spec).map(Element::Image)
    }

    /// See [`ImageElement::from_rgba`].
    pub fn image_from(image: RgbaImage, layout: Layout, window: FrameWindow) -> Self {
        Element::Image(ImageElement::from_rgba(image, layout, window))
    }

    /// See [`TextElement::new`].
    pub fn text(spec: &TextSpec) -> InlayResult<Self> {
        TextElement::new(spec).map(Element::Text)
    }

    /// See [`AnimationElement::open`].
    pub fn animation(spec: &AnimationSpec) -> InlayResult<Self> {
        AnimationElement::open(spec).map(Element::Animation)
    }

    /// See [`AnimationElement::from_frames`].
    pub fn animation_from(
        frames: Vec<RgbaImage>,
        period: Option<u32>,
        layout: Layout,
        window: FrameWindow,
    ) -> InlayResult<Self> {
        AnimationElement::from_frames(frames, period, layout, window).map(Element::Animation)
    }

    /// See [`VideoElement::open`].
    pub fn video(spec: &VideoSpec) -> InlayResult<Self> {
        VideoElement::open(spec).map(Element::Video)
    }

    /// See [`NestedElement::new`].
    pub fn nested(timeline: Timeline, layout: Layout, window: FrameWindow) -> InlayResult<Self> {
        NestedElement::new(timeline, layout, window).map(Element::Nested)
    }

    /// The element's resolved rectangle.
    pub fn rect(&self) -> Rect {
        match self {
            Element::Image(el) => el.rect,
            Element::Text(el) => el.rect,
            Element::Animation(el) => el.rect,
            Element::Video(el) => el.rect,
            Element::Nested(el) => el.rect,
        }
    }

    /// The margin the element was placed with.
    pub fn margin(&self) -> Margin {
        match self {
            Element::Image(el) => el.margin,
            Element::Text(el) => el.margin,
            Element::Animation(el) => el.margin,
            Element::Video(el) => el.margin,
            Element::Nested(el) => el.margin,
        }
    }

    /// The frame window in which the element draws.
    pub fn window(&self) -> FrameWindow {
        match self {
            Element::Image(el) => el.window,
            Element::Text(el) => el.window,
            Element::Animation(el) => el.window,
            Element::Video(el) => el.window,
            Element::Nested(el) => el.window,
        }
    }

    /// Snapshot for anchoring other elements to this one's edges.
    pub fn anchor_ref(&self) -> EdgeRef {
        EdgeRef {
            rect: self.rect(),
            margin: self.margin(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Element::Image(_) => "image",
            Element::Text(_) => "text",
            Element::Animation(_) => "animation",
            Element::Video(_) => "video",
            Element::Nested(_) => "timeline",
        }
    }

    pub fn is_active(&self, pos: u32) -> bool {
        self.window().contains(pos)
    }

    /// Composite this element onto the frame at position `pos`.
    /// Outside the element's window this leaves the frame untouched.
    pub fn edit(&self, frame: &mut Frame, pos: u32) {
        self.edit_offset(frame, pos, 0, 0);
    }

    pub(crate) fn edit_offset(&self, frame: &mut Frame, pos: u32, dx: i64, dy: i64) {
        if !self.is_active(pos) {
            return;
        }
        let rect = self.rect();
        let (left, top) = (rect.left + dx, rect.top + dy);
        match self {
            Element::Image(el) => el.pixels.draw(frame, left, top),
            Element::Text(el) => alpha_composite(frame, &el.raster, left, top),
            Element::Animation(el) => el.frame_at(pos).draw(frame, left, top),
            Element::Video(el) => blit(frame, el.plane_at(pos), left, top),
            Element::Nested(el) => {
                let local = pos - el.window.start;
                el.timeline.composite_offset(
                    frame,
                    local,
                    dx + el.rect.left - el.origin.0,
                    dy + el.rect.top - el.origin.1,
                );
            }
        }
    }

    /// Collect `(source, absolute start frame)` for every clip that
    /// contributes audio, nested timelines included.
    pub(crate) fn audio_clips(&self, base_start: u32, out: &mut Vec<(PathBuf, u32)>) {
        match self {
            Element::Video(el) => {
                if let Some(src) = &el.audio_source {
                    out.push((src.clone(), base_start + el.window.start));
                }
            }
            Element::Nested(el) => {
                for child in el.timeline.elements() {
                    child.audio_clips(base_start + el.window.start, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tests::system_font_path;
    use image::Rgba;
    use inlay_common::Color;

    fn solid_rgba(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for px in img.pixels_mut() {
            *px = Rgba(rgba);
        }
        img
    }

    #[test]
    fn scaled_size_preserves_aspect_ratio_one_sided() {
        assert_eq!(scaled_size(100, 50, None, None), (100, 50));
        assert_eq!(scaled_size(100, 50, Some(40), None), (40, 20));
        assert_eq!(scaled_size(100, 50, None, Some(25)), (50, 25));
        assert_eq!(scaled_size(100, 50, Some(10), Some(90)), (10, 90));
        // Rounding, not truncation.
        assert_eq!(scaled_size(3, 2, Some(2), None), (2, 1));
        assert_eq!(scaled_size(2, 3, Some(1), None), (1, 2));
    }

    #[test]
    fn opaque_sources_take_the_blit_path() {
        let el = ImageElement::from_rgba(
            solid_rgba(2, 2, [1, 2, 3, 255]),
            Layout::at(0, 0),
            FrameWindow::ALWAYS,
        );
        assert!(matches!(el.pixels, Pixels::Opaque(_)));

        let el = ImageElement::from_rgba(
            solid_rgba(2, 2, [1, 2, 3, 254]),
            Layout::at(0, 0),
            FrameWindow::ALWAYS,
        );
        assert!(matches!(el.pixels, Pixels::Blended(_)));
    }

    #[test]
    fn inactive_elements_leave_the_frame_bit_identical() {
        let el = Element::image_from(
            solid_rgba(4, 4, [255, 255, 255, 255]),
            Layout::at(0, 0),
            FrameWindow::between(5, 10),
        );
        let mut frame = Frame::solid(8, 8, Color::rgb(9, 9, 9));
        let before = frame.clone();

        el.edit(&mut frame, 4);
        assert_eq!(frame, before);
        el.edit(&mut frame, 11);
        assert_eq!(frame, before);

        el.edit(&mut frame, 5);
        assert_ne!(frame, before);
    }

    #[test]
    fn image_edit_replaces_pixels_inside_its_rect_only() {
        let el = Element::image_from(
            solid_rgba(2, 2, [10, 20, 30, 255]),
            Layout::at(3, 1),
            FrameWindow::ALWAYS,
        );
        let mut frame = Frame::new(6, 6);
        el.edit(&mut frame, 0);

        assert_eq!(frame.pixel(1, 3), Some([30, 20, 10]));
        assert_eq!(frame.pixel(2, 4), Some([30, 20, 10]));
        assert_eq!(frame.pixel(0, 3), Some([0, 0, 0]));
        assert_eq!(frame.pixel(1, 5), Some([0, 0, 0]));
    }

    #[test]
    fn missing_image_path_is_an_asset_error() {
        let spec = ImageSpec::new("/nonexistent/overlay.png");
        let err = Element::image(&spec).unwrap_err();
        assert!(matches!(err, InlayError::AssetNotFound { .. }));
    }

    #[test]
    fn animation_cycles_through_cached_frames() {
        let frames = vec![
            solid_rgba(1, 1, [10, 0, 0, 255]),
            solid_rgba(1, 1, [20, 0, 0, 255]),
        ];
        let el = Element::animation_from(frames, None, Layout::at(0, 0), FrameWindow::ALWAYS)
            .unwrap();

        let mut frame = Frame::new(1, 1);
        el.edit(&mut frame, 0);
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 10]));
        el.edit(&mut frame, 1);
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 20]));
        // Native period: two frames, so position 2 wraps to the first.
        el.edit(&mut frame, 2);
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 10]));
    }

    #[test]
    fn animation_sampling_starts_at_the_window_start() {
        let frames = vec![
            solid_rgba(1, 1, [10, 0, 0, 255]),
            solid_rgba(1, 1, [20, 0, 0, 255]),
        ];
        let el = Element::animation_from(
            frames,
            None,
            Layout::at(0, 0),
            FrameWindow::from_start(7),
        )
        .unwrap();

        let mut frame = Frame::new(1, 1);
        el.edit(&mut frame, 7);
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 10]));
        el.edit(&mut frame, 8);
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 20]));
    }

    #[test]
    fn empty_animation_is_rejected() {
        let err =
            Element::animation_from(Vec::new(), None, Layout::at(0, 0), FrameWindow::ALWAYS)
                .unwrap_err();
        assert!(matches!(err, InlayError::Render { .. }));
    }

    #[test]
    fn anchoring_below_a_constructed_element_matches_its_edges() {
        let anchor = Element::image_from(
            solid_rgba(10, 6, [0, 0, 0, 255]),
            Layout::at(20, 30).margin(Margin::uniform(4)),
            FrameWindow::ALWAYS,
        );
        let dependent = Element::image_from(
            solid_rgba(5, 5, [0, 0, 0, 255]),
            Layout::new()
                .top(anchor.anchor_ref())
                .left(anchor.anchor_ref())
                .margin(Margin::uniform(2)),
            FrameWindow::ALWAYS,
        );

        let a = anchor.rect();
        let d = dependent.rect();
        assert_eq!(d.top, a.bottom() + 4 + 2);
        assert_eq!(d.left, a.right() + 4 + 2);
    }

    #[test]
    fn nested_timeline_draws_at_its_placed_position() {
        let mut inner = Timeline::new();
        inner.append(Element::image_from(
            solid_rgba(2, 2, [50, 0, 0, 255]),
            Layout::at(0, 0),
            FrameWindow::ALWAYS,
        ));

        let el = Element::nested(inner, Layout::at(4, 3), FrameWindow::from_start(2)).unwrap();
        assert_eq!(el.rect(), Rect::new(4, 3, 2, 2));

        let mut frame = Frame::new(8, 8);
        el.edit(&mut frame, 1);
        assert_eq!(frame.pixel(3, 4), Some([0, 0, 0]));

        el.edit(&mut frame, 2);
        assert_eq!(frame.pixel(3, 4), Some([0, 0, 50]));
        assert_eq!(frame.pixel(4, 5), Some([0, 0, 50]));
        assert_eq!(frame.pixel(2, 3), Some([0, 0, 0]));
    }

    #[test]
    fn nested_children_run_on_local_time() {
        let mut inner = Timeline::new();
        inner.append(Element::image_from(
            solid_rgba(1, 1, [77, 0, 0, 255]),
            Layout::at(0, 0),
            FrameWindow::between(0, 1),
        ));

        // Parent window starts at 10, so the child shows at 10 and 11.
        let el = Element::nested(inner, Layout::at(0, 0), FrameWindow::from_start(10)).unwrap();

        let mut frame = Frame::new(1, 1);
        el.edit(&mut frame, 12);
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0]));
        el.edit(&mut frame, 10);
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 77]));
    }

    #[test]
    fn audio_clips_report_absolute_start_positions() {
        let clip = VideoElement {
            rect: Rect::new(0, 0, 1, 1),
            margin: Margin::ZERO,
            window: FrameWindow::from_start(5),
            frames: vec![BgrPlane::from_rgba(&solid_rgba(1, 1, [0, 0, 0, 255]))],
            period: 1,
            audio_source: Some(PathBuf::from("clip.mp4")),
        };
        let mut inner = Timeline::new();
        inner.append(Element::Video(clip));
        let nested = Element::nested(inner, Layout::at(0, 0), FrameWindow::from_start(3)).unwrap();

        let mut clips = Vec::new();
        nested.audio_clips(0, &mut clips);
        assert_eq!(clips, vec![(PathBuf::from("clip.mp4"), 8)]);
    }

    #[test]
    fn text_advance_modes_differ_in_next_position() {
        let Some(font) = system_font_path() else {
            eprintln!("no system font found, skipping");
            return;
        };

        let base = TextSpec::new("alpha\nbeta", font, 24.0).layout(Layout::at(10, 20));
        let word = TextElement::new(&base.clone().advance(Advance::Word)).unwrap();
        let line = TextElement::new(&base.advance(Advance::Line)).unwrap();

        let (wx, wy) = word.next_position();
        assert_eq!(wy, 10 + word.line_height as i64);
        assert!(wx > 20);

        let (lx, ly) = line.next_position();
        assert_eq!(lx, 20);
        assert_eq!(ly, 10 + 2 * line.line_height as i64);
    }

    #[test]
    fn text_rect_spans_its_rasterized_block() {
        let Some(font) = system_font_path() else {
            eprintln!("no system font found, skipping");
            return;
        };

        let spec = TextSpec::new("hello", font, 32.0).layout(Layout::at(5, 6));
        let el = Element::text(&spec).unwrap();
        let rect = el.rect();
        assert_eq!((rect.top, rect.left), (5, 6));
        assert!(rect.width > 0);
        assert!(rect.height > 0);

        let mut frame = Frame::new(200, 100);
        el.edit(&mut frame, 0);
        let changed = frame.data().iter().any(|&b| b != 0);
        assert!(changed, "text left no visible pixels");
    }
}
