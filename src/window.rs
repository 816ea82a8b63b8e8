// The on-screen window and what is drawn around the canvas.
// Layout, top to bottom: a toolbar (action button + status text), then the
// canvas, scaled to fit and centred in the space left over.

use crate::draw::{draw_text, fill_rect, outline_rect, text_height, text_width};
use crate::drag::Viewport;
use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rect, Size};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

const TOOLBAR_BG: u32 = 0x00_F2_F2_F2;
const TOOLBAR_BORDER: u32 = 0x00_CC_CC_CC;
const LETTERBOX_BG: u32 = 0x00_E0_E0_E0;
const BUTTON_BG: u32 = 0x00_2B_2B_2B;
const BUTTON_HOVER_BG: u32 = 0x00_44_44_44;
const BUTTON_TEXT: u32 = 0x00_FF_FF_FF;
const STATUS_TEXT: u32 = 0x00_33_33_33;

const PAD: i32 = 12;
const BUTTON_TEXT_SCALE: i32 = 2;

pub struct Drawer {
    window: Window,
}

impl Drawer {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window coordinates; `None` once it has left the window.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window.get_mouse_pos(MouseMode::Discard).map(|(x, y)| Point::new(x, y))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

/// Where things go in a window of a given size.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub toolbar_height: usize,
}

impl Layout {
    pub fn new(width: usize, height: usize, toolbar_height: usize) -> Self {
        Self { width, height, toolbar_height }
    }

    pub fn button(&self, label: &str) -> Rect {
        let h = (self.toolbar_height as i32 - 2 * 10).max(text_height(BUTTON_TEXT_SCALE) + 4);
        let w = text_width(label, BUTTON_TEXT_SCALE) + 2 * PAD;
        let y = (self.toolbar_height as i32 - h) / 2;
        Rect::new(PAD as f32, y as f32, w as f32, h as f32)
    }

    /// The canvas scaled to fit below the toolbar, aspect ratio kept, centred.
    pub fn viewport(&self, canvas: Size) -> Viewport {
        let area_w = self.width as f32;
        let area_h = self.height.saturating_sub(self.toolbar_height) as f32;
        if canvas.width <= 0.0 || canvas.height <= 0.0 || area_h <= 0.0 {
            return Viewport::new(Rect::new(0.0, self.toolbar_height as f32, area_w, area_h));
        }
        let scale = (area_w / canvas.width).min(area_h / canvas.height);
        let w = canvas.width * scale;
        let h = canvas.height * scale;
        let x = (area_w - w) / 2.0;
        let y = self.toolbar_height as f32 + (area_h - h) / 2.0;
        Viewport::new(Rect::new(x, y, w, h))
    }

    /// Paint the toolbar and the letterbox background; the caller blits the
    /// canvas into the viewport afterwards.
    pub fn draw_chrome(&self, fb: &mut FrameBuffer, label: &str, status: &str, hover: Option<Point>) {
        fb.fill(LETTERBOX_BG);
        let tb_h = self.toolbar_height as i32;
        fill_rect(fb, 0, 0, self.width as i32, tb_h, TOOLBAR_BG);
        fill_rect(fb, 0, tb_h - 1, self.width as i32, 1, TOOLBAR_BORDER);

        let button = self.button(label);
        let hovered = hover.is_some_and(|p| button.contains(p));
        let (bx, by, bw, bh) = (button.x as i32, button.y as i32, button.width as i32, button.height as i32);
        fill_rect(fb, bx, by, bw, bh, if hovered { BUTTON_HOVER_BG } else { BUTTON_BG });
        outline_rect(fb, bx, by, bw, bh, TOOLBAR_BORDER);
        let ty = by + (bh - text_height(BUTTON_TEXT_SCALE)) / 2;
        draw_text(fb, bx + PAD, ty, label, BUTTON_TEXT, BUTTON_TEXT_SCALE);

        // Status text shrinks to the small font when it would not fit.
        let sx = bx + bw + PAD + 4;
        let room = self.width as i32 - sx - PAD;
        let scale = if text_width(status, 2) <= room { 2 } else { 1 };
        let sy = (tb_h - text_height(scale)) / 2;
        draw_text(fb, sx, sy, status, STATUS_TEXT, scale);
    }
}
