// Luminance conversion for the uploaded photo.
// The canvas shows a grayscale copy; the decoded original is never modified.

use image::imageops::{self, FilterType};
use image::RgbaImage;

// Double precision throughout; f32 rounds some sums across a .5 boundary.
const R_WEIGHT: f64 = 0.299;
const G_WEIGHT: f64 = 0.587;
const B_WEIGHT: f64 = 0.114;

/// Store a computed channel value the way a clamped 8-bit pixel array does:
/// round half to even, then clamp to 0..=255.
#[inline]
fn store_u8(v: f64) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    R_WEIGHT * r as f64 + G_WEIGHT * g as f64 + B_WEIGHT * b as f64
}

/// Replace R, G and B of every pixel with its luminance. Alpha is left alone.
pub fn grayscale_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let gray = store_u8(luminance(px[0], px[1], px[2]));
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    }
}

/// Scale `source` to fill `width`×`height`, then convert the copy to grayscale.
pub fn build_processed(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut out = if source.dimensions() == (width, height) {
        source.clone()
    } else {
        imageops::resize(source, width, height, FilterType::Triangle)
    };
    grayscale_in_place(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(16, 9, |x, y| {
            Rgba([(x * 16) as u8, (y * 28) as u8, ((x * y) % 256) as u8, (255 - x * 3) as u8])
        })
    }

    #[test]
    fn weights_follow_luma_formula() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 7]));
        grayscale_in_place(&mut img);
        // 0.299 * 255 = 76.245
        assert_eq!(img.get_pixel(0, 0).0, [76, 76, 76, 7]);

        let mut img = RgbaImage::from_pixel(1, 1, Rgba([10, 200, 30, 255]));
        grayscale_in_place(&mut img);
        // 2.99 + 117.4 + 3.42 = 123.81
        assert_eq!(img.get_pixel(0, 0).0, [124, 124, 124, 255]);
    }

    #[test]
    fn near_half_sums_round_like_double_precision() {
        // 0.587 * 80 + 0.114 * 110 lands just below 59.5 in f64.
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([0, 80, 110, 255]));
        grayscale_in_place(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [59, 59, 59, 255]);
        assert_eq!(store_u8(luminance(0, 80, 110)), 59);
    }

    #[test]
    fn extremes_stay_in_range() {
        let mut img = RgbaImage::from_fn(2, 1, |x, _| if x == 0 { Rgba([0; 4]) } else { Rgba([255; 4]) });
        grayscale_in_place(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn conversion_is_idempotent() {
        let mut once = sample();
        grayscale_in_place(&mut once);
        let mut twice = once.clone();
        grayscale_in_place(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn every_gray_level_is_a_fixed_point() {
        for v in 0..=255u8 {
            assert_eq!(store_u8(luminance(v, v, v)), v);
        }
    }

    #[test]
    fn processed_copy_leaves_source_untouched() {
        let source = sample();
        let before = source.clone();
        let processed = build_processed(&source, 16, 9);
        assert_eq!(source, before);
        assert_eq!(processed.dimensions(), (16, 9));
        assert!(processed.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
        assert_eq!(processed.get_pixel(3, 4)[3], source.get_pixel(3, 4)[3]);
    }

    #[test]
    fn processed_copy_is_scaled_to_target() {
        let processed = build_processed(&sample(), 40, 20);
        assert_eq!(processed.dimensions(), (40, 20));
    }
}
