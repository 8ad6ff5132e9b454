//! Font loading and text rasterization.
//!
//! Text is laid out line by line (with optional greedy wrapping) and
//! rasterized onto a transparent RGBA canvas, which the compositor
//! then alpha-blends onto the frame. Glyph coverage multiplies the
//! text color's alpha, so translucent text falls out for free.

use std::path::Path;

use image::{Rgba, RgbaImage};
use inlay_common::{Color, InlayError, InlayResult};
use inlay_layout_core::{columns_for_width, wrap_text};
use rusttype::{point, Font, Scale};

/// A parsed TrueType/OpenType font.
pub struct FontHandle {
    font: Font<'static>,
}

impl FontHandle {
    /// Load and parse a font file.
    pub fn load(path: &Path) -> InlayResult<Self> {
        let path = InlayError::require_asset(path)?;
        let data = std::fs::read(&path)?;
        let font = Font::try_from_vec(data).ok_or_else(|| {
            InlayError::render(format!("failed to parse font file {}", path.display()))
        })?;
        Ok(Self { font })
    }

    /// Vertical space one text line occupies at the given size.
    pub fn line_height(&self, size: f32) -> u32 {
        let v = self.font.v_metrics(Scale::uniform(size));
        (v.ascent - v.descent + v.line_gap).ceil().max(1.0) as u32
    }

    /// Horizontal advance of a single line of text, in pixels.
    pub fn line_width(&self, text: &str, size: f32) -> u32 {
        let scale = Scale::uniform(size);
        let v = self.font.v_metrics(scale);
        self.font
            .layout(text, scale, point(0.0, v.ascent))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
            .ceil() as u32
    }

    /// Mean per-character advance of `text`, used to convert a pixel
    /// wrap budget into a column count. Never returns zero.
    pub fn average_advance(&self, text: &str, size: f32) -> u32 {
        let chars = text.chars().filter(|c| !c.is_whitespace()).count().max(1);
        let sample: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        (self.line_width(&sample, size) / chars as u32).max(1)
    }
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontHandle").finish_non_exhaustive()
    }
}

/// The measured shape of a text block before rasterization.
#[derive(Debug, Clone)]
pub struct TextLayout {
    /// Lines in draw order, post-wrapping.
    pub lines: Vec<String>,
    /// Measured pixel width of each line.
    pub line_widths: Vec<u32>,
    /// Vertical step between consecutive lines.
    pub line_height: u32,
    /// Block width: the wrap budget when wrapping, else the widest line.
    pub width: u32,
    /// Block height: line count times line height.
    pub height: u32,
}

/// Split, measure, and size a text block.
///
/// With `wrap_px` set, the text reflows greedily at word boundaries
/// into however many columns fit the budget and the block width
/// becomes that column budget. Without it, embedded newlines are the
/// only line breaks and the block is as wide as its widest line.
pub fn layout_text(
    font: &FontHandle,
    text: &str,
    size: f32,
    wrap_px: Option<u32>,
    line_height: Option<u32>,
) -> TextLayout {
    let line_height = line_height.unwrap_or_else(|| font.line_height(size));

    let (lines, width) = match wrap_px {
        Some(budget) => {
            let advance = font.average_advance(text, size);
            let columns = columns_for_width(budget, advance).max(1);
            let lines = wrap_text(text, columns);
            (lines, columns as u32 * advance)
        }
        None => {
            let lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
            let width = lines
                .iter()
                .map(|l| font.line_width(l, size))
                .max()
                .unwrap_or(0);
            (lines, width)
        }
    };

    let line_widths: Vec<u32> = lines.iter().map(|l| font.line_width(l, size)).collect();
    let height = lines.len() as u32 * line_height;

    TextLayout {
        lines,
        line_widths,
        line_height,
        width,
        height,
    }
}

/// Rasterize a laid-out block onto a fresh transparent canvas.
///
/// The canvas is at least as wide as the widest measured line, so
/// wrapped lines that overshoot the average-advance estimate are not
/// clipped.
pub fn render_block(font: &FontHandle, layout: &TextLayout, size: f32, color: Color) -> RgbaImage {
    let widest = layout.line_widths.iter().copied().max().unwrap_or(0);
    let width = layout.width.max(widest).max(1);
    let height = layout.height.max(1);
    let mut canvas = RgbaImage::new(width, height);

    for (i, line) in layout.lines.iter().enumerate() {
        draw_line(
            &mut canvas,
            font,
            line,
            size,
            color,
            0,
            i as i64 * layout.line_height as i64,
        );
    }
    canvas
}

/// Rasterize one line of text onto an RGBA canvas with its top-left
/// at `(x, y)`. Glyph coverage scales the color's alpha; overlapping
/// coverage keeps the stronger value.
pub fn draw_line(
    canvas: &mut RgbaImage,
    font: &FontHandle,
    text: &str,
    size: f32,
    color: Color,
    x: i64,
    y: i64,
) {
    let scale = Scale::uniform(size);
    let v = font.font.v_metrics(scale);

    for glyph in font.font.layout(text, scale, point(0.0, v.ascent)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = x + bb.min.x as i64 + gx as i64;
            let py = y + bb.min.y as i64 + gy as i64;
            if px < 0 || py < 0 || px >= canvas.width() as i64 || py >= canvas.height() as i64 {
                return;
            }
            let alpha = (coverage * color.a as f32).round().min(255.0) as u8;
            let existing = canvas.get_pixel(px as u32, py as u32).0[3];
            canvas.put_pixel(
                px as u32,
                py as u32,
                Rgba([color.r, color.g, color.b, existing.max(alpha)]),
            );
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Common system font locations; tests skip when none exists.
    const FONT_CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    ];

    pub(crate) fn system_font_path() -> Option<&'static Path> {
        FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
    }

    fn system_font() -> Option<FontHandle> {
        system_font_path().and_then(|p| FontHandle::load(p).ok())
    }

    macro_rules! font_or_skip {
        () => {
            match system_font() {
                Some(f) => f,
                None => {
                    eprintln!("no system font found, skipping");
                    return;
                }
            }
        };
    }

    #[test]
    fn missing_font_file_is_an_asset_error() {
        let err = FontHandle::load(Path::new("/nonexistent/font.ttf")).unwrap_err();
        assert!(matches!(err, InlayError::AssetNotFound { .. }));
    }

    #[test]
    fn line_height_grows_with_size() {
        let font = font_or_skip!();
        assert!(font.line_height(48.0) > font.line_height(24.0));
        assert!(font.line_height(24.0) > 0);
    }

    #[test]
    fn line_width_is_monotonic_in_text_length() {
        let font = font_or_skip!();
        let short = font.line_width("a", 32.0);
        let long = font.line_width("aaaa", 32.0);
        assert!(short > 0);
        assert!(long > short);
    }

    #[test]
    fn layout_without_wrap_follows_newlines() {
        let font = font_or_skip!();
        let layout = layout_text(&font, "one\ntwo\nthree", 32.0, None, None);
        assert_eq!(layout.lines.len(), 3);
        assert_eq!(layout.height, 3 * layout.line_height);
        assert_eq!(layout.width, font.line_width("three", 32.0));
    }

    #[test]
    fn layout_with_wrap_stays_inside_the_budget() {
        let font = font_or_skip!();
        let advance = font.average_advance("word", 32.0);
        let budget = advance * 6;
        let layout = layout_text(&font, "several words that need wrapping", 32.0, Some(budget), None);
        assert!(layout.lines.len() > 1);
        assert!(layout.width <= budget);
        for line in &layout.lines {
            assert!(line.chars().count() <= 6, "line too long: {line:?}");
        }
    }

    #[test]
    fn explicit_line_height_overrides_the_font_metric() {
        let font = font_or_skip!();
        let layout = layout_text(&font, "a\nb", 32.0, None, Some(99));
        assert_eq!(layout.line_height, 99);
        assert_eq!(layout.height, 198);
    }

    #[test]
    fn render_block_produces_visible_pixels_in_the_text_color() {
        let font = font_or_skip!();
        let color = Color::rgb(200, 40, 10);
        let layout = layout_text(&font, "Hi", 32.0, None, None);
        let canvas = render_block(&font, &layout, 32.0, color);

        let mut covered = 0usize;
        for px in canvas.pixels() {
            if px.0[3] > 0 {
                covered += 1;
                assert_eq!(&px.0[..3], &[200, 40, 10]);
            }
        }
        assert!(covered > 0, "no glyph coverage rendered");
    }

    #[test]
    fn translucent_color_caps_glyph_alpha() {
        let font = font_or_skip!();
        let color = Color::rgba(255, 255, 255, 120);
        let layout = layout_text(&font, "Hi", 32.0, None, None);
        let canvas = render_block(&font, &layout, 32.0, color);
        for px in canvas.pixels() {
            assert!(px.0[3] <= 120, "alpha exceeds the color's: {}", px.0[3]);
        }
    }
}
