// Watermark sizing and placement, all in canvas pixel space.

use crate::types::{Point, Size};

/// Stamp width as a share of the canvas width.
pub const WIDTH_RATIO: f32 = 0.24;
pub const MIN_WIDTH: f32 = 120.0;
pub const MAX_WIDTH: f32 = 360.0;
/// Gap between the default placement and the right/bottom edges.
pub const MARGIN: f32 = 20.0;

/// `min(max(v, lo), hi)`; unlike `f32::clamp` this never panics when `hi < lo`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Displayed stamp size for a canvas: width tracks the canvas, height keeps
/// the watermark's aspect ratio.
pub fn stamp_size(canvas: Size, natural: Size) -> Size {
    let width = clamp(canvas.width * WIDTH_RATIO, MIN_WIDTH, MAX_WIDTH);
    let ratio = if natural.width > 0.0 { natural.height / natural.width } else { 0.0 };
    Size::new(width, width * ratio)
}

/// Bottom-right corner with a fixed margin, never negative.
pub fn default_position(canvas: Size, stamp: Size) -> Point {
    Point::new(
        (canvas.width - stamp.width - MARGIN).max(0.0),
        (canvas.height - stamp.height - MARGIN).max(0.0),
    )
}

/// Keep the whole stamp inside the canvas. An axis on which the stamp does
/// not fit is pinned to 0.
pub fn clamp_position(p: Point, canvas: Size, stamp: Size) -> Point {
    Point::new(
        clamp(p.x, 0.0, canvas.width - stamp.width).max(0.0),
        clamp(p.y, 0.0, canvas.height - stamp.height).max(0.0),
    )
}
