// Compositing the visible canvas and showing it inside the window.

use crate::draw::{draw_text_centered, rgba_from_u32};
use crate::types::{FrameBuffer, Rect};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

pub const PLACEHOLDER_TEXT: &str = "Ladda upp en bild för att starta";
pub const BACKGROUND: u32 = 0x00_FF_FF_FF;
pub const PLACEHOLDER_COLOR: u32 = 0x00_66_66_66;
const PLACEHOLDER_SCALE: i32 = 2;

/// White canvas with the start hint centred on it.
pub fn draw_placeholder(canvas: &mut RgbaImage) {
    let bg = rgba_from_u32(BACKGROUND);
    canvas.pixels_mut().for_each(|p| *p = bg);
    let (w, h) = canvas.dimensions();
    draw_text_centered(canvas, w as i32 / 2, h as i32 / 2, PLACEHOLDER_TEXT, PLACEHOLDER_COLOR, PLACEHOLDER_SCALE);
}

/// Processed photo first, then the stamp (if any) scaled into `stamp_rect`.
/// Visual: exactly what the export will contain.
pub fn composite(canvas: &mut RgbaImage, processed: &RgbaImage, stamp: Option<(&RgbaImage, Rect)>) {
    // 1) Base layer: the grayscale copy, stretched if the canvas ever differs.
    let (w, h) = canvas.dimensions();
    if processed.dimensions() == (w, h) {
        canvas.copy_from_slice(processed.as_raw());
    } else {
        *canvas = imageops::resize(processed, w, h, FilterType::Triangle);
    }

    // 2) Watermark on top, only the part that lands on the canvas.
    if let Some((image, rect)) = stamp {
        let sw = rect.width.round().max(1.0) as u32;
        let sh = rect.height.round().max(1.0) as u32;
        let (x, y) = (rect.x.round() as i64, rect.y.round() as i64);
        if sw <= w && sh <= h {
            // Common case: the whole stamp fits, scale it in one go.
            let scaled = if image.dimensions() == (sw, sh) {
                image.clone()
            } else {
                imageops::resize(image, sw, sh, FilterType::Triangle)
            };
            blend_over(canvas, &scaled, x, y);
        } else if let Some((piece, px, py)) = visible_piece(image, sw, sh, x, y, w, h) {
            // Oversized stamp: never build an image larger than the canvas.
            blend_over(canvas, &piece, px, py);
        }
    }
}

/// Visible rows/cols of a span of `len` pixels starting at `pos`, in span-local
/// coordinates, given a target `limit` pixels long.
fn visible_span(pos: i64, len: u32, limit: u32) -> Option<(u32, u32)> {
    let start = (-pos).clamp(0, len as i64);
    let end = (limit as i64 - pos).clamp(0, len as i64);
    (start < end).then_some((start as u32, end as u32))
}

/// Scale only the slice of `image` that a `sw`×`sh` stamp at (x, y) shows on a
/// `w`×`h` canvas. Returns the piece and where its top-left goes.
fn visible_piece(image: &RgbaImage, sw: u32, sh: u32, x: i64, y: i64, w: u32, h: u32) -> Option<(RgbaImage, i64, i64)> {
    let (x0, x1) = visible_span(x, sw, w)?;
    let (y0, y1) = visible_span(y, sh, h)?;
    let (nw, nh) = image.dimensions();
    // Matching source region, rounded outwards and at least one pixel.
    let src_span = |a: u32, b: u32, len: u32, natural: u32| {
        let s = ((a as u64 * natural as u64) / len as u64) as u32;
        let e = ((b as u64 * natural as u64).div_ceil(len as u64) as u32).clamp(s + 1, natural.max(s + 1));
        (s.min(natural.saturating_sub(1)), e.min(natural))
    };
    let (sx0, sx1) = src_span(x0, x1, sw, nw);
    let (sy0, sy1) = src_span(y0, y1, sh, nh);
    let crop = imageops::crop_imm(image, sx0, sy0, sx1 - sx0, sy1 - sy0).to_image();
    let piece = imageops::resize(&crop, x1 - x0, y1 - y0, FilterType::Triangle);
    Some((piece, x + x0 as i64, y + y0 as i64))
}

/// Source-over `src` onto `dst` with its top-left at (x, y); clipped to `dst`.
/// Visual: opaque stamp pixels cover the photo, transparent ones leave it be.
pub fn blend_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (dst.width() as i64, dst.height() as i64);
    for (sx, sy, s) in src.enumerate_pixels() {
        let (tx, ty) = (x + sx as i64, y + sy as i64);
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(tx as u32, ty as u32);
        *d = over(*s, *d);
    }
}

/// Straight-alpha "over" for one pixel.
#[inline]
fn over(s: Rgba<u8>, d: Rgba<u8>) -> Rgba<u8> {
    // Fast paths: fully opaque / fully transparent source.
    match s[3] {
        255 => return s,
        0 => return d,
        _ => {}
    }
    let sa = s[3] as f32 / 255.0;
    let da = d[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mix = |sc: u8, dc: u8| {
        let c = (sc as f32 * sa + dc as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([mix(s[0], d[0]), mix(s[1], d[1]), mix(s[2], d[2]), (out_a * 255.0).round() as u8])
}

/// Nearest-neighbour blit of the canvas into `dest` of the framebuffer,
/// flattened over white the way a page background shows through.
pub fn blit_canvas(fb: &mut FrameBuffer, canvas: &RgbaImage, dest: Rect) {
    let (cw, ch) = canvas.dimensions();
    if cw == 0 || ch == 0 || dest.width < 1.0 || dest.height < 1.0 {
        return;
    }
    let x0 = dest.x.round().max(0.0) as usize;
    let y0 = dest.y.round().max(0.0) as usize;
    let x1 = (dest.right().round() as usize).min(fb.width);
    let y1 = (dest.bottom().round() as usize).min(fb.height);

    // For each window pixel, sample the canvas pixel under its centre.
    for y in y0..y1 {
        let sy = (((y as f32 + 0.5 - dest.y) * ch as f32 / dest.height) as u32).min(ch - 1);
        let row = y * fb.width;
        for x in x0..x1 {
            let sx = (((x as f32 + 0.5 - dest.x) * cw as f32 / dest.width) as u32).min(cw - 1);
            let p = over(*canvas.get_pixel(sx, sy), Rgba([255, 255, 255, 255]));
            fb.pixels[row + x] = ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_white_with_gray_text() {
        let mut canvas = RgbaImage::new(1000, 620);
        draw_placeholder(&mut canvas);
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert!(canvas.pixels().any(|p| p.0 == [0x66, 0x66, 0x66, 255]));
        // Text sits around the middle row only.
        assert!((0..1000).all(|x| canvas.get_pixel(x, 100).0 == [255, 255, 255, 255]));
    }

    #[test]
    fn composite_places_opaque_stamp() {
        let processed = RgbaImage::from_pixel(20, 10, Rgba([50, 50, 50, 255]));
        let stamp = RgbaImage::from_pixel(4, 2, Rgba([200, 0, 0, 255]));
        let mut canvas = RgbaImage::new(20, 10);
        composite(&mut canvas, &processed, Some((&stamp, Rect::new(10.0, 5.0, 4.0, 2.0))));
        assert_eq!(canvas.get_pixel(10, 5).0, [200, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(13, 6).0, [200, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(14, 6).0, [50, 50, 50, 255]);
        assert_eq!(canvas.get_pixel(9, 5).0, [50, 50, 50, 255]);
    }

    #[test]
    fn transparent_stamp_pixels_keep_the_photo() {
        let processed = RgbaImage::from_pixel(4, 4, Rgba([80, 80, 80, 255]));
        let stamp = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
        let mut canvas = RgbaImage::new(4, 4);
        composite(&mut canvas, &processed, Some((&stamp, Rect::new(1.0, 1.0, 2.0, 2.0))));
        assert_eq!(canvas, processed);
    }

    #[test]
    fn half_alpha_blends() {
        let out = over(Rgba([255, 255, 255, 128]), Rgba([0, 0, 0, 255]));
        assert_eq!(out[3], 255);
        assert!((127..=129).contains(&out[0]));
    }

    #[test]
    fn stamp_past_the_edge_is_clipped() {
        let mut dst = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        let src = RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255]));
        blend_over(&mut dst, &src, 2, -2);
        assert_eq!(dst.get_pixel(2, 0).0, [9, 9, 9, 255]);
        assert_eq!(dst.get_pixel(1, 0).0, [0, 0, 0, 255]);
        assert_eq!(dst.get_pixel(2, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn very_tall_stamp_is_only_scaled_where_visible() {
        let processed = RgbaImage::from_pixel(20, 10, Rgba([50, 50, 50, 255]));
        let stamp = RgbaImage::from_pixel(1, 10_000, Rgba([0, 200, 0, 255]));
        let mut canvas = RgbaImage::new(20, 10);
        composite(&mut canvas, &processed, Some((&stamp, Rect::new(0.0, 0.0, 360.0, 3_600_000.0))));
        assert_eq!(canvas.dimensions(), (20, 10));
        assert!(canvas.pixels().all(|p| p.0 == [0, 200, 0, 255]));
    }

    #[test]
    fn oversized_stamp_keeps_its_offset() {
        let processed = RgbaImage::from_pixel(20, 10, Rgba([50, 50, 50, 255]));
        let stamp = RgbaImage::from_pixel(4, 40, Rgba([0, 0, 200, 255]));
        let mut canvas = RgbaImage::new(20, 10);
        composite(&mut canvas, &processed, Some((&stamp, Rect::new(5.0, 4.0, 4.0, 40.0))));
        assert_eq!(canvas.get_pixel(5, 4).0, [0, 0, 200, 255]);
        assert_eq!(canvas.get_pixel(8, 9).0, [0, 0, 200, 255]);
        assert_eq!(canvas.get_pixel(4, 4).0, [50, 50, 50, 255]);
        assert_eq!(canvas.get_pixel(5, 3).0, [50, 50, 50, 255]);
        assert_eq!(canvas.get_pixel(9, 9).0, [50, 50, 50, 255]);
    }

    #[test]
    fn visible_span_clips_both_ends() {
        assert_eq!(visible_span(-5, 20, 10), Some((5, 15)));
        assert_eq!(visible_span(3, 4, 10), Some((0, 4)));
        assert_eq!(visible_span(12, 4, 10), None);
        assert_eq!(visible_span(-30, 4, 10), None);
    }

    #[test]
    fn composite_is_repeatable() {
        let processed = RgbaImage::from_fn(30, 20, |x, y| Rgba([(x * 8) as u8, (x * 8) as u8, (x * 8) as u8, (y * 12) as u8]));
        let stamp = RgbaImage::from_fn(8, 4, |x, _| Rgba([255, 0, 0, (x * 30) as u8]));
        let rect = Rect::new(7.4, 3.6, 12.0, 6.0);
        let mut a = RgbaImage::new(30, 20);
        let mut b = RgbaImage::new(30, 20);
        composite(&mut a, &processed, Some((&stamp, rect)));
        composite(&mut b, &processed, Some((&stamp, rect)));
        composite(&mut b, &processed, Some((&stamp, rect)));
        assert_eq!(a, b);
    }

    #[test]
    fn blit_scales_into_viewport() {
        let mut canvas = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 255, 255]));
        canvas.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let mut fb = FrameBuffer::new(10, 6);
        blit_canvas(&mut fb, &canvas, Rect::new(1.0, 1.0, 8.0, 4.0));
        assert_eq!(fb.pixels[0], 0);
        assert_eq!(fb.pixels[10 + 1], 0x00_FF_00_00);
        assert_eq!(fb.pixels[10 * 2 + 2], 0x00_FF_00_00);
        assert_eq!(fb.pixels[10 * 4 + 8], 0x00_00_00_FF);
        assert_eq!(fb.pixels[10 * 5 + 9], 0);
    }
}
