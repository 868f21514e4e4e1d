//! Free transform: whole-shape translate/scale/rotate through an external
//! handle widget.
//!
//! The widget reports one matrix per drag update, always relative to the
//! moment transform mode was entered. The pre-transform model is kept as a
//! snapshot and every update is applied to that snapshot, never to the
//! previous result.

use glam::DAffine2;

use crate::model::{ShapeGeometry, ShapeKind, ShapeModel};
use crate::types::Bounds;

/// What the handle widget may offer for a shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformOptions {
    /// Corner handles scale both axes by the same factor
    pub keep_ratio: bool,
    /// Offer a rotation handle
    pub rotate: bool,
    /// Offer edge-midpoint handles for single-axis scaling
    pub scale_sides: bool,
    pub handle_radius: f64,
}

impl TransformOptions {
    pub fn for_kind(kind: ShapeKind, handle_radius: f64) -> Self {
        let (keep_ratio, rotate, scale_sides) = match kind {
            ShapeKind::Polygon => (false, true, true),
            ShapeKind::Circle => (true, false, false),
            ShapeKind::Ellipse | ShapeKind::Rectangle => (false, false, true),
        };
        TransformOptions {
            keep_ratio,
            rotate,
            scale_sides,
            handle_radius,
        }
    }
}

/// External widget that draws transform handles around a bounding box.
///
/// The widget feeds matrices back through
/// [`EditorSession::transform_update`](crate::EditorSession::transform_update).
pub trait TransformHandles {
    fn attach(&mut self, bounds: Bounds, options: &TransformOptions);
    fn detach(&mut self);
}

/// Handles that are never shown
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHandles;

impl TransformHandles for NullHandles {
    fn attach(&mut self, _bounds: Bounds, _options: &TransformOptions) {}

    fn detach(&mut self) {}
}

/// An active free transform
#[derive(Clone, Debug)]
pub(crate) struct FreeTransform {
    snapshot: ShapeModel,
}

impl FreeTransform {
    pub fn begin(model: &ShapeModel) -> Self {
        FreeTransform {
            snapshot: model.clone(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.snapshot.bounds()
    }

    /// The snapshot pushed through `matrix`
    pub fn apply(&self, matrix: &DAffine2) -> ShapeModel {
        self.snapshot.transformed(matrix)
    }
}
