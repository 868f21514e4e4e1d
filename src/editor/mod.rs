//! The editing state machine.
//!
//! This module is organized into submodules:
//! - `defaults`: default point radius, vertex floor and boxes
//! - `hit`: pointer hit testing against handles and edges
//! - `transform`: free-transform snapshot and the handle widget trait
//!
//! A [`GeometryEditor`] owns one document-space [`ShapeModel`] and moves it
//! between three states: idle vertex editing, dragging one handle, and free
//! transform. Every input method returns an [`Outcome`] telling the caller
//! whether to redraw and whether the CSS value changed.

pub mod defaults;
pub mod hit;
pub mod transform;

pub use transform::{NullHandles, TransformHandles, TransformOptions};

use glam::{DAffine2, DVec2};

use crate::config::EditorConfig;
use crate::model::{ShapeGeometry, ShapeKind, ShapeModel};
use crate::surface::Primitive;
use transform::FreeTransform;

/// Where the editor is in its interaction cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EditState {
    /// Vertex editing, nothing grabbed
    #[default]
    Idle,
    /// Handle (or polygon vertex) `usize` follows the pointer
    DraggingVertex(usize),
    /// Whole-shape transform; vertex editing is suspended
    TransformActive,
}

/// Result of feeding one input to the editor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing happened
    Ignored,
    /// Something visual changed, the shape did not
    Redraw,
    /// The shape changed
    Changed,
}

impl Outcome {
    pub fn needs_redraw(self) -> bool {
        !matches!(self, Outcome::Ignored)
    }

    pub fn changed(self) -> bool {
        matches!(self, Outcome::Changed)
    }
}

/// Pointer-driven editor for one shape
#[derive(Clone, Debug)]
pub struct GeometryEditor {
    model: ShapeModel,
    state: EditState,
    transform: Option<FreeTransform>,
    point_radius: f64,
    min_vertices: usize,
}

impl GeometryEditor {
    pub fn new(model: ShapeModel, config: &EditorConfig) -> Self {
        GeometryEditor {
            model,
            state: EditState::Idle,
            transform: None,
            point_radius: config.point_radius,
            min_vertices: config.min_vertices,
        }
    }

    pub fn model(&self) -> &ShapeModel {
        &self.model
    }

    #[cfg(test)]
    pub(crate) fn model_mut(&mut self) -> &mut ShapeModel {
        &mut self.model
    }

    pub fn kind(&self) -> ShapeKind {
        self.model.kind()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_transforming(&self) -> bool {
        self.state == EditState::TransformActive
    }

    /// Grab a handle, or on a polygon edge insert a vertex and grab it.
    pub fn pointer_down(&mut self, p: DVec2) -> Outcome {
        if self.is_transforming() {
            return Outcome::Ignored;
        }

        if let Some(index) = hit::handle_at(&self.model.handles(), p, self.point_radius) {
            self.state = EditState::DraggingVertex(index);
            return Outcome::Redraw;
        }

        let threshold_sq = self.point_radius * self.point_radius;
        let Some(polygon) = self.model.as_polygon_mut() else {
            self.state = EditState::Idle;
            return Outcome::Ignored;
        };
        match hit::edge_near(&polygon.points(), p, threshold_sq) {
            Some(edge) => {
                let index = edge + 1;
                polygon.insert_vertex(index, p);
                crate::log::debug!(edge, index, x = p.x, y = p.y, "inserted vertex on edge");
                self.state = EditState::DraggingVertex(index);
                Outcome::Changed
            }
            None => {
                self.state = EditState::Idle;
                Outcome::Ignored
            }
        }
    }

    pub fn pointer_move(&mut self, p: DVec2) -> Outcome {
        let EditState::DraggingVertex(index) = self.state else {
            return Outcome::Ignored;
        };
        if self.model.move_handle(index, p) {
            Outcome::Changed
        } else {
            crate::log::warn!(index, "dragged handle no longer exists");
            self.state = EditState::Idle;
            Outcome::Redraw
        }
    }

    pub fn pointer_up(&mut self) -> Outcome {
        match self.state {
            EditState::DraggingVertex(_) => {
                self.state = EditState::Idle;
                Outcome::Redraw
            }
            _ => Outcome::Ignored,
        }
    }

    /// Remove the polygon vertex under `p`, keeping at least the vertex floor.
    pub fn double_click(&mut self, p: DVec2) -> Outcome {
        if self.state != EditState::Idle {
            return Outcome::Ignored;
        }
        let (radius, floor) = (self.point_radius, self.min_vertices);
        let Some(polygon) = self.model.as_polygon_mut() else {
            return Outcome::Ignored;
        };
        let Some(index) = hit::handle_at(&polygon.points(), p, radius) else {
            return Outcome::Ignored;
        };
        if polygon.vertices.len() <= floor {
            crate::log::debug!(index, floor, "vertex floor reached, not removing");
            return Outcome::Ignored;
        }
        polygon.remove_vertex(index);
        Outcome::Changed
    }

    /// Snapshot the shape and attach transform handles around it.
    ///
    /// Returns `false` if transform mode was already active.
    pub fn enter_transform(&mut self, handles: &mut dyn TransformHandles) -> bool {
        if self.is_transforming() {
            return false;
        }
        let t = FreeTransform::begin(&self.model);
        handles.attach(t.bounds(), &TransformOptions::for_kind(self.kind(), self.point_radius));
        crate::log::debug!(kind = %self.kind(), "entering transform mode");
        self.transform = Some(t);
        self.state = EditState::TransformActive;
        true
    }

    /// Detach the handles and go back to vertex editing.
    ///
    /// Returns `false` if transform mode was not active.
    pub fn leave_transform(&mut self, handles: &mut dyn TransformHandles) -> bool {
        if !self.is_transforming() {
            return false;
        }
        handles.detach();
        crate::log::debug!(kind = %self.kind(), "leaving transform mode");
        self.transform = None;
        self.state = EditState::Idle;
        true
    }

    pub fn toggle_transform(&mut self, handles: &mut dyn TransformHandles) {
        if self.is_transforming() {
            self.leave_transform(handles);
        } else {
            self.enter_transform(handles);
        }
    }

    /// Replace the shape with the transform snapshot pushed through `matrix`.
    pub fn apply_transform(&mut self, matrix: &DAffine2) -> Outcome {
        match &self.transform {
            Some(t) => {
                self.model = t.apply(matrix);
                Outcome::Changed
            }
            None => Outcome::Ignored,
        }
    }

    /// Swap in a new model of the same kind, dropping any drag.
    pub(crate) fn replace_model(&mut self, model: ShapeModel) {
        self.model = model;
        if let EditState::DraggingVertex(_) = self.state {
            self.state = EditState::Idle;
        }
    }

    /// Everything to draw for the current state
    pub fn scene(&self) -> Vec<Primitive> {
        let mut frame = vec![self.model.outline()];
        match self.state {
            EditState::TransformActive => {
                let b = self.model.bounds();
                if !b.is_empty() {
                    frame.push(Primitive::Rect {
                        origin: b.min,
                        size: b.max - b.min,
                        radii: DVec2::ZERO,
                    });
                }
            }
            EditState::Idle | EditState::DraggingVertex(_) => {
                let active = match self.state {
                    EditState::DraggingVertex(i) => Some(i),
                    _ => None,
                };
                frame.extend(self.model.handles().into_iter().enumerate().map(|(i, center)| {
                    Primitive::Handle {
                        center,
                        radius: self.point_radius,
                        active: active == Some(i),
                    }
                }));
            }
        }
        frame
    }
}
