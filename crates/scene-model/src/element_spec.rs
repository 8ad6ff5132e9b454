//! Explicit per-variant element construction options.
//!
//! Every variant enumerates its recognized options as plain struct fields;
//! there is no attribute-bag pass-through. Size and position resolution
//! happen in the render engine when an element is built from its spec.

use crate::filter::FrameFilter;
use crate::layout::Layout;
use crate::window::FrameWindow;
use inlay_common::{Color, InlayError, InlayResult, RenderDefaults};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Options for a still-image element.
#[derive(Debug, Clone)]
pub struct ImageSpec {
    /// Path to the image asset. PNG alpha is honored via the blended
    /// compositing path; everything else blits opaquely.
    pub path: PathBuf,
    /// Explicit width; `None` keeps the native width (or scales it to
    /// preserve aspect when only the height is given).
    pub width: Option<u32>,
    /// Explicit height; same aspect rules as `width`.
    pub height: Option<u32>,
    /// Pixel conversion applied once at load.
    pub filter: FrameFilter,
    pub layout: Layout,
    pub window: FrameWindow,
}

impl ImageSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: None,
            height: None,
            filter: FrameFilter::None,
            layout: Layout::default(),
            window: FrameWindow::ALWAYS,
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn filter(mut self, filter: FrameFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn window(mut self, window: FrameWindow) -> Self {
        self.window = window;
        self
    }
}

/// How the low-level text raster reports the position following the drawn
/// run, for callers chaining further text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Advance {
    /// Continue after the last glyph of the last line.
    #[default]
    Word,
    /// Continue at the start of the following line.
    Line,
}

impl Advance {
    pub const ALL: [Advance; 2] = [Advance::Word, Advance::Line];

    pub fn name(&self) -> &'static str {
        match self {
            Advance::Word => "word",
            Advance::Line => "line",
        }
    }
}

impl fmt::Display for Advance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Advance {
    type Err = InlayError;

    fn from_str(s: &str) -> InlayResult<Self> {
        Self::ALL
            .iter()
            .find(|a| a.name() == s)
            .copied()
            .ok_or_else(|| {
                InlayError::unsupported("return position", s, Self::ALL.iter().map(|a| a.name()))
            })
    }
}

/// Options for a text element.
#[derive(Debug, Clone)]
pub struct TextSpec {
    /// The string to draw. Embedded newlines start new lines; wrapping may
    /// split lines further.
    pub text: String,
    /// Path to a TrueType font file.
    pub font: PathBuf,
    /// Font size in pixels.
    pub size: f32,
    /// Fill color. A translucent alpha routes drawing through the blended
    /// compositing path.
    pub color: Color,
    /// Wrap width in pixels. `None` draws each input line as-is; the
    /// element width becomes the single-line extent. With a wrap width the
    /// element width becomes the column limit and the height grows with
    /// the wrapped line count.
    pub wrap: Option<u32>,
    /// Line height override in pixels; defaults to the font's own.
    pub line_height: Option<u32>,
    /// Next-position mode reported by the raster call.
    pub advance: Advance,
    pub layout: Layout,
    pub window: FrameWindow,
}

impl TextSpec {
    pub fn new(text: impl Into<String>, font: impl Into<PathBuf>, size: f32) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
            color: Color::BLACK,
            wrap: None,
            line_height: None,
            advance: Advance::Word,
            layout: Layout::default(),
            window: FrameWindow::ALWAYS,
        }
    }

    /// A spec taking its size from the app config's render defaults.
    pub fn with_default_size(
        text: impl Into<String>,
        font: impl Into<PathBuf>,
        defaults: &RenderDefaults,
    ) -> Self {
        Self::new(text, font, defaults.font_size)
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn wrap(mut self, width_px: u32) -> Self {
        self.wrap = Some(width_px);
        self
    }

    pub fn line_height(mut self, px: u32) -> Self {
        self.line_height = Some(px);
        self
    }

    pub fn advance(mut self, advance: Advance) -> Self {
        self.advance = advance;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn window(mut self, window: FrameWindow) -> Self {
        self.window = window;
        self
    }
}

/// Options for a looping animation element (an animated GIF or a
/// pre-decoded frame sequence).
#[derive(Debug, Clone)]
pub struct AnimationSpec {
    /// Path to the animated image asset.
    pub path: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Loop period in output frames. `None` means one native sub-frame per
    /// output frame, i.e. a period equal to the sub-frame count.
    pub period: Option<u32>,
    pub layout: Layout,
    pub window: FrameWindow,
}

impl AnimationSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: None,
            height: None,
            period: None,
            layout: Layout::default(),
            window: FrameWindow::ALWAYS,
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn period(mut self, frames: u32) -> Self {
        self.period = Some(frames);
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn window(mut self, window: FrameWindow) -> Self {
        self.window = window;
        self
    }
}

/// Options for an embedded video-clip element.
#[derive(Debug, Clone)]
pub struct VideoSpec {
    /// Path to the video asset.
    pub path: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Loop period in output frames; `None` loops over the clip's native
    /// frame count.
    pub period: Option<u32>,
    /// Whether the clip's own audio joins the overlay chain.
    pub audio: bool,
    pub layout: Layout,
    pub window: FrameWindow,
}

impl VideoSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: None,
            height: None,
            period: None,
            audio: true,
            layout: Layout::default(),
            window: FrameWindow::ALWAYS,
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn period(mut self, frames: u32) -> Self {
        self.period = Some(frames);
        self
    }

    pub fn muted(mut self) -> Self {
        self.audio = false;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn window(mut self, window: FrameWindow) -> Self {
        self.window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_spec_defaults() {
        let spec = ImageSpec::new("logo.png");
        assert_eq!(spec.width, None);
        assert_eq!(spec.filter, FrameFilter::None);
        assert_eq!(spec.window, FrameWindow::ALWAYS);
    }

    #[test]
    fn test_text_spec_builder() {
        let spec = TextSpec::new("hello", "font.ttf", 32.0)
            .color(Color::WHITE)
            .wrap(240)
            .window(FrameWindow::between(10, 20));
        assert_eq!(spec.color, Color::WHITE);
        assert_eq!(spec.wrap, Some(240));
        assert_eq!(spec.window.end, Some(20));
        assert_eq!(spec.advance, Advance::Word);
    }

    #[test]
    fn test_advance_parse() {
        assert_eq!("word".parse::<Advance>().unwrap(), Advance::Word);
        assert_eq!("line".parse::<Advance>().unwrap(), Advance::Line);
        let err = "paragraph".parse::<Advance>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("word") && msg.contains("line"));
    }

    #[test]
    fn test_video_spec_muted() {
        let spec = VideoSpec::new("clip.mp4").muted().period(60);
        assert!(!spec.audio);
        assert_eq!(spec.period, Some(60));
    }

    #[test]
    fn test_text_spec_from_defaults() {
        let defaults = inlay_common::RenderDefaults::default();
        let spec = TextSpec::with_default_size("hi", "font.ttf", &defaults);
        assert_eq!(spec.size, defaults.font_size);
        assert_eq!(spec.color, Color::BLACK);
    }
}
