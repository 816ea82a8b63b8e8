// Software drawing shared by the canvas (RgbaImage) and the window framebuffer:
// single pixels, filled/outlined rectangles and a tiny 5x7 bitmap font.

use crate::types::FrameBuffer;
use image::{Rgba, RgbaImage};

/// Anything we can plot opaque 0x00RRGGBB pixels into.
pub trait PixelTarget {
    fn size(&self) -> (usize, usize);
    /// Caller guarantees `x < width && y < height`.
    fn set(&mut self, x: usize, y: usize, color: u32);
}

impl PixelTarget for FrameBuffer {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn set(&mut self, x: usize, y: usize, color: u32) {
        self.pixels[y * self.width + x] = color;
    }
}

impl PixelTarget for RgbaImage {
    fn size(&self) -> (usize, usize) {
        (self.width() as usize, self.height() as usize)
    }

    fn set(&mut self, x: usize, y: usize, color: u32) {
        self.put_pixel(x as u32, y as u32, rgba_from_u32(color));
    }
}

#[inline]
pub fn rgba_from_u32(color: u32) -> Rgba<u8> {
    Rgba([(color >> 16) as u8, (color >> 8) as u8, color as u8, 255])
}

/// Put a pixel if (x,y) is inside bounds.
#[inline]
pub fn put_pixel<T: PixelTarget + ?Sized>(t: &mut T, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    let (w, h) = t.size();
    if x >= w || y >= h {
        return;
    }
    t.set(x, y, color);
}

pub fn fill_rect<T: PixelTarget + ?Sized>(t: &mut T, x: i32, y: i32, w: i32, h: i32, color: u32) {
    for yy in y..y + h {
        for xx in x..x + w {
            put_pixel(t, xx, yy, color);
        }
    }
}

/// One-pixel border just inside (x, y, w, h).
pub fn outline_rect<T: PixelTarget + ?Sized>(t: &mut T, x: i32, y: i32, w: i32, h: i32, color: u32) {
    for xx in x..x + w {
        put_pixel(t, xx, y, color);
        put_pixel(t, xx, y + h - 1, color);
    }
    for yy in y..y + h {
        put_pixel(t, x, yy, color);
        put_pixel(t, x + w - 1, yy, color);
    }
}

/* ---------- 5x7 bitmap font: upper-case Latin + ÅÄÖ, digits, punctuation ---------- */

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;
/// Glyph width plus one column of spacing.
const ADVANCE: i32 = GLYPH_W + 1;

/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
/// Lower-case input is drawn with the upper-case glyph.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    let ch = ch.to_uppercase().next().unwrap_or(ch);
    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),
        'Å' => g!(0b00100,0b00000,0b01110,0b10001,0b11111,0b10001,0b10001),
        'Ä' => g!(0b01010,0b00000,0b01110,0b10001,0b11111,0b10001,0b10001),
        'Ö' => g!(0b01010,0b00000,0b01110,0b10001,0b10001,0b10001,0b01110),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00100,0b00100,0b01000),
        '-' => g!(0b00000,0b00000,0b00000,0b01110,0b00000,0b00000,0b00000),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '&' => g!(0b01100,0b10010,0b10100,0b01000,0b10101,0b10010,0b01101),

        _ => None,
    }
}

/// Width in pixels of `text` drawn at `scale`.
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { (n * ADVANCE - 1) * scale }
}

pub fn text_height(scale: i32) -> i32 {
    GLYPH_H * scale
}

/// Draw a single glyph with its top-left at (x,y); each font pixel becomes a
/// `scale`×`scale` block. Unknown characters leave a gap.
fn draw_char<T: PixelTarget + ?Sized>(t: &mut T, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_W {
            if (rowbits & (1 << (4 - rx))) != 0 {
                fill_rect(t, x + rx * scale, y + ry as i32 * scale, scale, scale, color);
            }
        }
    }
}

pub fn draw_text<T: PixelTarget + ?Sized>(t: &mut T, mut x: i32, y: i32, text: &str, color: u32, scale: i32) {
    for ch in text.chars() {
        draw_char(t, x, y, ch, color, scale);
        x += ADVANCE * scale;
    }
}

/// Draw `text` centred on (cx, cy).
pub fn draw_text_centered<T: PixelTarget + ?Sized>(t: &mut T, cx: i32, cy: i32, text: &str, color: u32, scale: i32) {
    let x = cx - text_width(text, scale) / 2;
    let y = cy - text_height(scale) / 2;
    draw_text(t, x, y, text, color, scale);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_strings_have_glyphs() {
        for text in [
            "Ladda upp en bild för att starta",
            "Ladda upp foto",
            "Ladda ner bild",
            "Dra märket till valfri plats i bilden.",
            "Märkesbilden kunde inte laddas. Kontrollera filen 'förslag 112.png'.",
            "Bilden kunde inte exporteras. Försök igen.",
        ] {
            for ch in text.chars() {
                assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?} in {text:?}");
            }
        }
    }

    #[test]
    fn text_metrics() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 2), 22);
        assert_eq!(text_height(3), 21);
    }

    #[test]
    fn drawing_is_clipped() {
        let mut fb = FrameBuffer::new(8, 8);
        draw_text(&mut fb, -3, -3, "W", 0x00_FF_FF_FF, 2);
        fill_rect(&mut fb, 6, 6, 10, 10, 0x00_00_00_FF);
        assert_eq!(fb.pixels[7 * 8 + 7], 0x00_00_00_FF);
    }

    #[test]
    fn plots_into_rgba_image() {
        let mut img = RgbaImage::new(4, 4);
        put_pixel(&mut img, 1, 2, 0x00_66_66_66);
        assert_eq!(img.get_pixel(1, 2).0, [0x66, 0x66, 0x66, 255]);
        outline_rect(&mut img, 0, 0, 4, 4, 0x00_FF_00_00);
        assert_eq!(img.get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 2).0, [0, 0, 0, 0]);
    }
}
