// Dragging the watermark: pointer mapping, hit testing and the Idle/Dragging machine.

use crate::stamp::clamp_position;
use crate::types::{Point, PointerId, Rect, Size};

/// Where the canvas is shown on screen. Pointer input arrives in window
/// ("client") coordinates and is mapped into canvas pixel space through this.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub rect: Rect,
}

impl Viewport {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// `(client - rect.origin) * canvas / rect.size`, per axis.
    pub fn to_canvas(&self, client: Point, canvas: Size) -> Point {
        let scale_x = if self.rect.width > 0.0 { canvas.width / self.rect.width } else { 1.0 };
        let scale_y = if self.rect.height > 0.0 { canvas.height / self.rect.height } else { 1.0 };
        Point::new((client.x - self.rect.x) * scale_x, (client.y - self.rect.y) * scale_y)
    }

    pub fn contains(&self, client: Point) -> bool {
        self.rect.contains(client)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position minus stamp top-left, captured on press.
        offset: Point,
        /// Device holding the capture.
        pointer: PointerId,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Idle → Dragging when `pointer` lands inside `stamp`. Returns whether
    /// the drag started.
    pub fn press(&mut self, id: PointerId, pointer: Point, stamp: Rect) -> bool {
        if self.is_dragging() || !stamp.contains(pointer) {
            return false;
        }
        *self = DragState::Dragging { offset: pointer - stamp.origin(), pointer: id };
        tracing::debug!(?id, x = pointer.x, y = pointer.y, "drag started");
        true
    }

    /// New stamp top-left for a move while dragging, already clamped.
    /// `None` when idle or when the move comes from a device without the capture.
    pub fn motion(&self, id: PointerId, pointer: Point, canvas: Size, stamp: Size) -> Option<Point> {
        match *self {
            DragState::Dragging { offset, pointer: held } if held == id => {
                Some(clamp_position(pointer - offset, canvas, stamp))
            }
            _ => None,
        }
    }

    /// Dragging → Idle. Returns the pointer whose capture should be released,
    /// if `id` is the one holding it.
    pub fn release(&mut self, id: PointerId) -> Option<PointerId> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { pointer, .. } => {
                *self = DragState::Idle;
                tracing::debug!(?id, "drag ended");
                (pointer == id).then_some(pointer)
            }
        }
    }
}
