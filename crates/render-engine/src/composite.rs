//! Pixel placement: opaque blits and alpha compositing.
//!
//! Both operations clip the overlay against the destination frame,
//! so overlays may hang off any edge (or miss the frame entirely)
//! without error.

use image::RgbaImage;

use crate::frame::{BgrPlane, Frame};

/// The overlap between a `src_w x src_h` overlay placed at
/// `(left, top)` and a `dst_w x dst_h` destination.
struct Overlap {
    src_x: usize,
    src_y: usize,
    dst_x: usize,
    dst_y: usize,
    width: usize,
    height: usize,
}

fn overlap(dst_w: u32, dst_h: u32, src_w: u32, src_h: u32, left: i64, top: i64) -> Option<Overlap> {
    let src_x = (-left).max(0) as u64;
    let src_y = (-top).max(0) as u64;
    let dst_x = left.max(0) as u64;
    let dst_y = top.max(0) as u64;

    let width = (src_w as u64)
        .saturating_sub(src_x)
        .min((dst_w as u64).saturating_sub(dst_x));
    let height = (src_h as u64)
        .saturating_sub(src_y)
        .min((dst_h as u64).saturating_sub(dst_y));
    if width == 0 || height == 0 {
        return None;
    }

    Some(Overlap {
        src_x: src_x as usize,
        src_y: src_y as usize,
        dst_x: dst_x as usize,
        dst_y: dst_y as usize,
        width: width as usize,
        height: height as usize,
    })
}

/// Copy an opaque BGR plane onto the frame at `(left, top)`.
pub fn blit(frame: &mut Frame, plane: &BgrPlane, left: i64, top: i64) {
    let Some(o) = overlap(
        frame.width(),
        frame.height(),
        plane.width(),
        plane.height(),
        left,
        top,
    ) else {
        return;
    };

    let frame_w = frame.width() as usize;
    for row in 0..o.height {
        let src_row = plane.row((o.src_y + row) as u32);
        let src = &src_row[o.src_x * 3..(o.src_x + o.width) * 3];
        let dst_start = ((o.dst_y + row) * frame_w + o.dst_x) * 3;
        frame.data_mut()[dst_start..dst_start + o.width * 3].copy_from_slice(src);
    }
}

/// Blend an RGBA overlay onto the frame at `(left, top)`.
///
/// Per pixel: alpha 0 leaves the frame untouched, alpha 255 replaces
/// it, and anything between mixes source over background with
/// integer `(src * a + dst * (255 - a)) / 255` arithmetic.
pub fn alpha_composite(frame: &mut Frame, overlay: &RgbaImage, left: i64, top: i64) {
    let Some(o) = overlap(
        frame.width(),
        frame.height(),
        overlay.width(),
        overlay.height(),
        left,
        top,
    ) else {
        return;
    };

    let frame_w = frame.width() as usize;
    let data = frame.data_mut();
    for row in 0..o.height {
        for col in 0..o.width {
            let px = overlay.get_pixel((o.src_x + col) as u32, (o.src_y + row) as u32).0;
            let a = px[3] as u32;
            if a == 0 {
                continue;
            }
            let i = ((o.dst_y + row) * frame_w + o.dst_x + col) * 3;
            if a == 255 {
                data[i] = px[2];
                data[i + 1] = px[1];
                data[i + 2] = px[0];
            } else {
                data[i] = mix(px[2], data[i], a);
                data[i + 1] = mix(px[1], data[i + 1], a);
                data[i + 2] = mix(px[0], data[i + 2], a);
            }
        }
    }
}

fn mix(src: u8, dst: u8, alpha: u32) -> u8 {
    ((src as u32 * alpha + dst as u32 * (255 - alpha)) / 255) as u8
}
