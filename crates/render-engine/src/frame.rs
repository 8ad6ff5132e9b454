//! Packed BGR24 frame buffers.
//!
//! Every frame that moves through the pipeline is a tightly packed
//! `height x width x 3` byte buffer in BGR channel order, matching
//! what ffmpeg produces and consumes in `rawvideo`/`bgr24` mode.

use image::{RgbImage, RgbaImage};
use inlay_common::{Color, InlayError, InlayResult};
use inlay_scene_model::{FrameFilter, Rect};

/// A single video frame: packed BGR24 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// A black frame of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    /// A frame filled with a single color. Alpha is ignored.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let mut frame = Self::new(width, height);
        frame.fill(color);
        frame
    }

    /// Wrap an existing BGR24 buffer, checking its length.
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> InlayResult<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(InlayError::render(format!(
                "frame buffer is {} bytes, expected {} for {}x{} BGR24",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The frame's own rectangle, anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// BGR triple at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Write a BGR triple at `(x, y)`. Out-of-frame writes are dropped.
    pub fn put_pixel(&mut self, x: u32, y: u32, bgr: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        self.data[i..i + 3].copy_from_slice(&bgr);
    }

    /// Fill the whole frame with a color. Alpha is ignored.
    pub fn fill(&mut self, color: Color) {
        let bgr = color.bgr();
        for px in self.data.chunks_exact_mut(3) {
            px.copy_from_slice(&bgr);
        }
    }

    /// Fill a rectangle with a color, clipped to the frame.
    ///
    /// Rectangles that fall entirely outside the frame are a no-op.
    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let Some(clipped) = rect.intersect(&self.rect()) else {
            return;
        };
        let bgr = color.bgr();
        for y in clipped.top..clipped.bottom() {
            let row = (y as usize * self.width as usize + clipped.left as usize) * 3;
            for px in self.data[row..row + clipped.width as usize * 3].chunks_exact_mut(3) {
                px.copy_from_slice(&bgr);
            }
        }
    }

    /// Apply a whole-frame color conversion in place.
    pub fn apply_filter(&mut self, filter: FrameFilter) {
        apply_filter_bgr(&mut self.data, filter);
    }

    /// Copy into an RGB image, e.g. for saving still frames.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut out = RgbImage::new(self.width, self.height);
        for (px, src) in out.pixels_mut().zip(self.data.chunks_exact(3)) {
            px.0 = [src[2], src[1], src[0]];
        }
        out
    }
}

/// Decoded asset pixels in frame-native BGR order.
///
/// Overlay sources without transparency are stored this way so that
/// compositing them is a straight row copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgrPlane {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BgrPlane {
    pub fn from_rgb(image: &RgbImage) -> Self {
        let mut data = Vec::with_capacity(image.len());
        for px in image.pixels() {
            data.extend_from_slice(&[px.0[2], px.0[1], px.0[0]]);
        }
        Self {
            width: image.width(),
            height: image.height(),
            data,
        }
    }

    /// Drops the alpha channel; callers check transparency first.
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let mut data = Vec::with_capacity(image.len() / 4 * 3);
        for px in image.pixels() {
            data.extend_from_slice(&[px.0[2], px.0[1], px.0[0]]);
        }
        Self {
            width: image.width(),
            height: image.height(),
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// One pixel row as a BGR byte slice.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize * 3;
        &self.data[start..start + self.width as usize * 3]
    }

    pub fn apply_filter(&mut self, filter: FrameFilter) {
        apply_filter_bgr(&mut self.data, filter);
    }
}

impl From<Frame> for BgrPlane {
    /// Frames and planes share the packed BGR24 layout.
    fn from(frame: Frame) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            data: frame.data,
        }
    }
}

/// Apply a color conversion to a packed BGR byte buffer.
pub(crate) fn apply_filter_bgr(data: &mut [u8], filter: FrameFilter) {
    match filter {
        FrameFilter::None => {}
        FrameFilter::Nega => {
            for b in data.iter_mut() {
                *b = 255 - *b;
            }
        }
        FrameFilter::Bgr2Rgb => {
            for px in data.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
        }
        FrameFilter::Gray => {
            for px in data.chunks_exact_mut(3) {
                let y = luma(px);
                px.copy_from_slice(&[y, y, y]);
            }
        }
        FrameFilter::Heatmap => {
            for px in data.chunks_exact_mut(3) {
                let y = luma(px);
                px.copy_from_slice(&jet(y));
            }
        }
        FrameFilter::MinMax => {
            // Constant buffers are left unchanged.
            let min = data.iter().copied().min().unwrap_or(0);
            let max = data.iter().copied().max().unwrap_or(0);
            if max == min {
                return;
            }
            let range = (max - min) as u32;
            for b in data.iter_mut() {
                *b = ((*b - min) as u32 * 255 / range) as u8;
            }
        }
    }
}

/// BT.601 luma of one BGR pixel.
fn luma(bgr: &[u8]) -> u8 {
    ((bgr[2] as u32 * 299 + bgr[1] as u32 * 587 + bgr[0] as u32 * 114) / 1000) as u8
}

/// Map a luma value onto the jet color ramp, as BGR.
fn jet(v: u8) -> [u8; 3] {
    let t = v as f32 / 255.0;
    let r = (1.5 - (4.0 * t - 3.0).abs()).clamp(0.0, 1.0);
    let g = (1.5 - (4.0 * t - 2.0).abs()).clamp(0.0, 1.0);
    let b = (1.5 - (4.0 * t - 1.0).abs()).clamp(0.0, 1.0);
    [(b * 255.0) as u8, (g * 255.0) as u8, (r * 255.0) as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_fills_every_pixel() {
        let frame = Frame::solid(4, 3, Color::rgb(10, 20, 30));
        for px in frame.data().chunks_exact(3) {
            assert_eq!(px, [30, 20, 10]);
        }
    }

    #[test]
    fn fill_rect_is_clipped_to_the_frame() {
        let mut frame = Frame::new(8, 8);
        frame.fill_rect(&Rect::new(6, 6, 10, 10), Color::WHITE);

        assert_eq!(frame.pixel(6, 6), Some([255, 255, 255]));
        assert_eq!(frame.pixel(7, 7), Some([255, 255, 255]));
        assert_eq!(frame.pixel(5, 5), Some([0, 0, 0]));
        assert_eq!(frame.pixel(5, 7), Some([0, 0, 0]));
    }

    #[test]
    fn fill_rect_outside_the_frame_is_a_noop() {
        let mut frame = Frame::new(4, 4);
        let before = frame.clone();
        frame.fill_rect(&Rect::new(-20, -20, 5, 5), Color::WHITE);
        frame.fill_rect(&Rect::new(100, 100, 5, 5), Color::WHITE);
        assert_eq!(frame, before);
    }

    #[test]
    fn nega_is_an_involution() {
        let mut frame = Frame::solid(2, 2, Color::rgb(10, 200, 77));
        let original = frame.clone();
        frame.apply_filter(FrameFilter::Nega);
        assert_ne!(frame, original);
        frame.apply_filter(FrameFilter::Nega);
        assert_eq!(frame, original);
    }

    #[test]
    fn bgr2rgb_swaps_channels() {
        let mut frame = Frame::solid(1, 1, Color::rgb(1, 2, 3));
        assert_eq!(frame.pixel(0, 0), Some([3, 2, 1]));
        frame.apply_filter(FrameFilter::Bgr2Rgb);
        assert_eq!(frame.pixel(0, 0), Some([1, 2, 3]));
    }

    #[test]
    fn gray_equalizes_channels() {
        let mut frame = Frame::solid(2, 1, Color::rgb(250, 10, 60));
        frame.apply_filter(FrameFilter::Gray);
        let px = frame.pixel(0, 0).unwrap();
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn minmax_stretches_to_the_full_range() {
        let mut frame = Frame::new(2, 1);
        frame.put_pixel(0, 0, [60, 60, 60]);
        frame.put_pixel(1, 0, [180, 180, 180]);
        frame.apply_filter(FrameFilter::MinMax);
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(frame.pixel(1, 0), Some([255, 255, 255]));
    }

    #[test]
    fn minmax_leaves_constant_frames_alone() {
        let mut frame = Frame::solid(3, 3, Color::rgb(9, 9, 9));
        let before = frame.clone();
        frame.apply_filter(FrameFilter::MinMax);
        assert_eq!(frame, before);
    }

    #[test]
    fn heatmap_maps_dark_to_blue_and_bright_to_red() {
        let mut frame = Frame::new(1, 1);
        frame.apply_filter(FrameFilter::Heatmap);
        let dark = frame.pixel(0, 0).unwrap();
        assert!(dark[0] > dark[2], "dark pixels lean blue: {dark:?}");

        let mut frame = Frame::solid(1, 1, Color::WHITE);
        frame.apply_filter(FrameFilter::Heatmap);
        let bright = frame.pixel(0, 0).unwrap();
        assert!(bright[2] > bright[0], "bright pixels lean red: {bright:?}");
    }

    #[test]
    fn plane_from_rgba_drops_alpha_and_reorders() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, image::Rgba([9, 8, 7, 100]));
        let plane = BgrPlane::from_rgba(&image);
        assert_eq!(plane.data(), &[7, 8, 9]);
    }

    #[test]
    fn to_rgb_image_round_trips_channel_order() {
        let frame = Frame::solid(2, 2, Color::rgb(12, 34, 56));
        let rgb = frame.to_rgb_image();
        assert_eq!(rgb.get_pixel(0, 0).0, [12, 34, 56]);
    }
}
