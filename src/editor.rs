// One editing session: the loaded photo, the watermark, where it sits, and the
// pixels currently on the visible canvas. Everything the window does goes
// through here, so the whole flow is testable without a display.

use crate::blob::BlobStore;
use crate::config::Config;
use crate::drag::DragState;
use crate::error::{ExportError, LoadError};
use crate::export::{SaveSink, encode_png};
use crate::grayscale::build_processed;
use crate::render::{composite, draw_placeholder};
use crate::stamp::{clamp_position, default_position, stamp_size};
use crate::types::{Point, PointerId, Rect, Size};
use image::RgbaImage;
use std::path::PathBuf;

pub const STATUS_READY: &str = "Dra märket till valfri plats i bilden.";
pub const STATUS_LOAD_FAILED: &str = "Bilden kunde inte laddas. Försök igen med en annan fil.";
pub const STATUS_EXPORT_FAILED: &str = "Bilden kunde inte exporteras. Försök igen.";
pub const LABEL_UPLOAD: &str = "Ladda upp foto";
pub const LABEL_DOWNLOAD: &str = "Ladda ner bild";

/// What a click on the action button should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    OpenPicker,
    Export,
}

/// Result of an export attempt that did not fail.
#[derive(Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing loaded yet; nothing to export.
    NothingToExport,
    /// The user backed out of the save.
    Cancelled,
    Saved(PathBuf),
}

pub struct Editor {
    config: Config,
    base: Option<RgbaImage>,
    stamp: Option<RgbaImage>,
    /// `None` until dragged; means bottom-right default.
    stamp_position: Option<Point>,
    drag: DragState,
    processed: Option<RgbaImage>,
    canvas: RgbaImage,
    status: String,
}

impl Editor {
    pub fn new(config: Config) -> Self {
        let canvas = RgbaImage::new(config.canvas_width, config.canvas_height);
        let mut editor = Self {
            config,
            base: None,
            stamp: None,
            stamp_position: None,
            drag: DragState::Idle,
            processed: None,
            canvas,
            status: String::new(),
        };
        editor.render();
        editor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn canvas_size(&self) -> Size {
        Size::of(self.canvas.width(), self.canvas.height())
    }

    pub fn processed(&self) -> Option<&RgbaImage> {
        self.processed.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    pub fn has_stamp(&self) -> bool {
        self.stamp.is_some()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn button_label(&self) -> &'static str {
        if self.has_base() { LABEL_DOWNLOAD } else { LABEL_UPLOAD }
    }

    pub fn click_action(&self) -> Action {
        if self.has_base() { Action::Export } else { Action::OpenPicker }
    }

    /// Message shown when the bundled watermark is missing or broken.
    pub fn stamp_failed_status(&self) -> String {
        format!(
            "Märkesbilden kunde inte laddas. Kontrollera filen '{}'.",
            self.config.stamp_path.display()
        )
    }

    /// A decoded upload (or why there isn't one). Failures leave the previous
    /// photo in place.
    pub fn apply_photo(&mut self, result: Result<RgbaImage, LoadError>) {
        let image = match result {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(%err, "photo load failed");
                self.status = STATUS_LOAD_FAILED.to_string();
                return;
            }
        };

        // Canvas takes the photo's natural size; the grayscale copy is built
        // once here, not on every render.
        let (w, h) = image.dimensions();
        self.canvas = RgbaImage::new(w, h);
        self.processed = Some(build_processed(&image, w, h));
        self.base = Some(image);
        // Visual: the stamp jumps back to the bottom-right corner.
        self.stamp_position = None;
        self.drag = DragState::Idle;
        self.status = STATUS_READY.to_string();
        tracing::info!(width = w, height = h, "photo loaded");
        self.render();
    }

    /// The watermark finished loading. On failure it stays absent for the session.
    pub fn apply_stamp(&mut self, result: Result<RgbaImage, LoadError>) {
        match result {
            Ok(image) => {
                self.stamp = Some(image);
                if self.has_base() {
                    self.stamp_position = None;
                    self.render();
                }
            }
            Err(err) => {
                // No retry: the photo flow keeps working without a stamp.
                tracing::warn!(%err, "stamp load failed");
                self.status = self.stamp_failed_status();
            }
        }
    }

    /// Displayed stamp size, or `None` until both images are loaded.
    pub fn stamp_size(&self) -> Option<Size> {
        let stamp = self.stamp.as_ref()?;
        self.base.as_ref()?;
        Some(stamp_size(self.canvas_size(), Size::of(stamp.width(), stamp.height())))
    }

    pub fn stamp_rect(&self) -> Option<Rect> {
        let size = self.stamp_size()?;
        let origin = self
            .stamp_position
            .unwrap_or_else(|| default_position(self.canvas_size(), size));
        Some(Rect::from_origin(origin, size))
    }

    /// Put the stamp's top-left at `p`, clamped into the canvas.
    pub fn move_stamp_to(&mut self, p: Point) {
        let Some(size) = self.stamp_size() else { return };
        self.stamp_position = Some(clamp_position(p, self.canvas_size(), size));
        self.render();
    }

    /// Pointer pressed at `p` (canvas pixel space). Returns whether a drag started.
    pub fn pointer_down(&mut self, id: PointerId, p: Point) -> bool {
        let Some(rect) = self.stamp_rect() else { return false };
        self.drag.press(id, p, rect)
    }

    /// Visual: the stamp follows the mouse but never slides off the photo.
    pub fn pointer_move(&mut self, id: PointerId, p: Point) {
        let Some(size) = self.stamp_size() else { return };
        if let Some(pos) = self.drag.motion(id, p, self.canvas_size(), size) {
            self.stamp_position = Some(pos);
            self.render();
        }
    }

    /// Pointer up, cancel and leave all end the drag the same way. Returns the
    /// capture to release, if `id` held it.
    pub fn pointer_up(&mut self, id: PointerId) -> Option<PointerId> {
        self.drag.release(id)
    }

    pub fn pointer_cancel(&mut self, id: PointerId) -> Option<PointerId> {
        self.drag.release(id)
    }

    pub fn pointer_leave(&mut self, id: PointerId) -> Option<PointerId> {
        self.drag.release(id)
    }

    /// Redraw the visible canvas from the current state.
    /// Visual: placeholder until a photo arrives, then photo + stamp.
    pub fn render(&mut self) {
        let Some(processed) = self.processed.as_ref().filter(|_| self.base.is_some()) else {
            draw_placeholder(&mut self.canvas);
            return;
        };
        let stamp = match (self.stamp.as_ref(), self.stamp_rect()) {
            (Some(image), Some(rect)) => Some((image, rect)),
            _ => None,
        };
        composite(&mut self.canvas, processed, stamp);
    }

    /// Save the visible canvas as PNG. Failures are reported in the status
    /// text as well as returned.
    pub fn export(&mut self, sink: &mut dyn SaveSink, blobs: &BlobStore) -> Result<ExportOutcome, ExportError> {
        if !self.has_base() {
            return Ok(ExportOutcome::NothingToExport);
        }
        // Encode what is on screen, hold the bytes only for the save itself.
        let result = encode_png(&self.canvas).and_then(|bytes| {
            let blob = blobs.acquire(bytes);
            tracing::debug!(url = %blob.url(), "export blob ready");
            sink.save(&self.config.export_name, blob.bytes())
        });
        match result {
            Ok(Some(path)) => {
                tracing::info!(path = %path.display(), "image exported");
                Ok(ExportOutcome::Saved(path))
            }
            Ok(None) => Ok(ExportOutcome::Cancelled),
            Err(err) => {
                tracing::warn!(%err, "export failed");
                self.status = STATUS_EXPORT_FAILED.to_string();
                Err(err)
            }
        }
    }
}
