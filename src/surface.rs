//! Drawing surface capability.
//!
//! The editor describes each frame as a flat list of primitives in document
//! coordinates and hands it to whatever draws the overlay.

use glam::DVec2;

use crate::types::FillRule;

/// One thing to draw on the overlay
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Closed polygon outline
    Polygon { points: Vec<DVec2>, fill_rule: FillRule },
    Circle { center: DVec2, radius: f64 },
    Ellipse { center: DVec2, radii: DVec2 },
    /// Rectangle with optional corner radii (zero when absent)
    Rect { origin: DVec2, size: DVec2, radii: DVec2 },
    /// Draggable vertex or resize handle
    Handle { center: DVec2, radius: f64, active: bool },
}

/// Something that can render overlay frames.
pub trait Surface {
    /// Replace everything on the surface with `frame`.
    fn draw(&mut self, frame: &[Primitive]);

    /// Remove everything from the surface.
    fn clear(&mut self);
}

/// A surface that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn draw(&mut self, _frame: &[Primitive]) {}

    fn clear(&mut self) {}
}

/// A surface that keeps the last frame, for hosts that poll instead of push.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub frame: Vec<Primitive>,
    /// Number of frames drawn since creation
    pub frames_drawn: usize,
}

impl Surface for RecordingSurface {
    fn draw(&mut self, frame: &[Primitive]) {
        self.frame = frame.to_vec();
        self.frames_drawn += 1;
    }

    fn clear(&mut self) {
        self.frame.clear();
    }
}
