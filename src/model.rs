//! The coordinate model for the four shape functions.
//!
//! Every coordinate is held in pixels together with the unit it must be
//! written back in. Geometry behavior that differs per shape (handles,
//! translation, free-transform application) lives behind [`ShapeGeometry`],
//! dispatched statically over [`ShapeModel`].

use enum_dispatch::enum_dispatch;
use glam::{DAffine2, DVec2, dvec2};
use std::fmt;

use crate::surface::Primitive;
use crate::types::{BoxType, Bounds, Coord, FillRule};

/// The four supported shape functions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Polygon,
    Circle,
    Ellipse,
    Rectangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Polygon,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Rectangle,
    ];

    /// CSS function name
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Polygon => "polygon",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Rectangle => "rectangle",
        }
    }

    /// Function name with parens, for messages
    pub fn function(self) -> &'static str {
        match self {
            ShapeKind::Polygon => "polygon()",
            ShapeKind::Circle => "circle()",
            ShapeKind::Ellipse => "ellipse()",
            ShapeKind::Rectangle => "rectangle()",
        }
    }

    /// Look up a kind by function name (ASCII case-insensitive)
    pub fn from_name(name: &str) -> Option<ShapeKind> {
        let name = name.trim();
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How circle and ellipse arguments were written
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Notation {
    /// Comma separated: `circle(r, cx, cy)`, `ellipse(cx, cy, rx, ry)`
    #[default]
    Legacy,
    /// `circle(r at cx cy)`, `ellipse(rx ry at cx cy)`
    At,
}

/// Per-shape geometry behavior.
#[enum_dispatch]
pub trait ShapeGeometry {
    fn kind(&self) -> ShapeKind;

    /// Reference box keyword written after the function, if any
    fn reference_box(&self) -> Option<BoxType>;

    /// Shift every positional component by `delta`.
    /// Radii and dimensions are translation-invariant and stay put.
    fn translate(&mut self, delta: DVec2);

    /// Positions of the draggable handles, in handle-index order
    fn handles(&self) -> Vec<DVec2>;

    /// Drag handle `index` to `to`. Returns `false` if there is no such handle.
    fn move_handle(&mut self, index: usize, to: DVec2) -> bool;

    fn bounds(&self) -> Bounds;

    /// This shape pushed through `matrix`, with every unit preserved.
    fn transformed(&self, matrix: &DAffine2) -> ShapeModel;

    /// Outline to draw for this shape
    fn outline(&self) -> Primitive;
}

/// A parsed or inferred shape
#[enum_dispatch(ShapeGeometry)]
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeModel {
    Polygon(Polygon),
    Circle(Circle),
    Ellipse(Ellipse),
    Rectangle(Rectangle),
}

impl ShapeModel {
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            ShapeModel::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            ShapeModel::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Whether every pixel value in the model is finite
    pub fn is_finite(&self) -> bool {
        let coords: Vec<Coord> = match self {
            ShapeModel::Polygon(p) => p.vertices.iter().flat_map(|v| [v.x, v.y]).collect(),
            ShapeModel::Circle(c) => vec![c.cx, c.cy, c.r],
            ShapeModel::Ellipse(e) => vec![e.cx, e.cy, e.rx, e.ry],
            ShapeModel::Rectangle(r) => [Some(r.x), Some(r.y), Some(r.w), Some(r.h), r.rx, r.ry]
                .into_iter()
                .flatten()
                .collect(),
        };
        coords.iter().all(|c| c.px.is_finite())
    }
}

/// Per-axis scale factors of an affine matrix
fn axis_scales(matrix: &DAffine2) -> DVec2 {
    dvec2(matrix.matrix2.x_axis.length(), matrix.matrix2.y_axis.length())
}

// ============================================================================
// Polygon
// ============================================================================

/// One polygon vertex
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vertex {
    pub x: Coord,
    pub y: Coord,
}

impl Vertex {
    pub fn new(x: Coord, y: Coord) -> Self {
        Vertex { x, y }
    }

    pub fn point(&self) -> DVec2 {
        dvec2(self.x.px, self.y.px)
    }

    pub fn set_point(&mut self, p: DVec2) {
        self.x.px = p.x;
        self.y.px = p.y;
    }
}

/// `polygon()`: an ordered, closed path
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub fill_rule: Option<FillRule>,
    pub reference_box: Option<BoxType>,
}

impl Polygon {
    pub fn points(&self) -> Vec<DVec2> {
        self.vertices.iter().map(Vertex::point).collect()
    }

    /// Insert a vertex at `index`, taking units from the vertex it follows.
    pub fn insert_vertex(&mut self, index: usize, at: DVec2) {
        let template = index
            .checked_sub(1)
            .and_then(|i| self.vertices.get(i))
            .or_else(|| self.vertices.last())
            .copied()
            .unwrap_or_default();
        let vertex = Vertex::new(template.x.with_px(at.x), template.y.with_px(at.y));
        let index = index.min(self.vertices.len());
        self.vertices.insert(index, vertex);
    }

    pub fn remove_vertex(&mut self, index: usize) -> Option<Vertex> {
        (index < self.vertices.len()).then(|| self.vertices.remove(index))
    }
}

impl ShapeGeometry for Polygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn reference_box(&self) -> Option<BoxType> {
        self.reference_box
    }

    fn translate(&mut self, delta: DVec2) {
        for v in &mut self.vertices {
            v.x.px += delta.x;
            v.y.px += delta.y;
        }
    }

    fn handles(&self) -> Vec<DVec2> {
        self.points()
    }

    fn move_handle(&mut self, index: usize, to: DVec2) -> bool {
        match self.vertices.get_mut(index) {
            Some(v) => {
                v.set_point(to);
                true
            }
            None => false,
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points(self.points())
    }

    fn transformed(&self, matrix: &DAffine2) -> ShapeModel {
        let mut out = self.clone();
        for v in &mut out.vertices {
            v.set_point(matrix.transform_point2(v.point()));
        }
        out.into()
    }

    fn outline(&self) -> Primitive {
        Primitive::Polygon {
            points: self.points(),
            fill_rule: self.fill_rule.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Circle
// ============================================================================

/// `circle()`. Handles: `[center, radius]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Circle {
    pub cx: Coord,
    pub cy: Coord,
    pub r: Coord,
    pub notation: Notation,
    pub reference_box: Option<BoxType>,
}

impl Circle {
    pub fn center(&self) -> DVec2 {
        dvec2(self.cx.px, self.cy.px)
    }

    fn set_center(&mut self, c: DVec2) {
        self.cx.px = c.x;
        self.cy.px = c.y;
    }
}

impl ShapeGeometry for Circle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn reference_box(&self) -> Option<BoxType> {
        self.reference_box
    }

    fn translate(&mut self, delta: DVec2) {
        self.set_center(self.center() + delta);
    }

    fn handles(&self) -> Vec<DVec2> {
        let c = self.center();
        vec![c, c + dvec2(self.r.px, 0.0)]
    }

    fn move_handle(&mut self, index: usize, to: DVec2) -> bool {
        match index {
            0 => self.set_center(to),
            1 => self.r.px = self.center().distance(to),
            _ => return false,
        }
        true
    }

    fn bounds(&self) -> Bounds {
        let c = self.center();
        let r = DVec2::splat(self.r.px);
        Bounds::from_points([c - r, c + r])
    }

    // circles never rotate; the x-axis scale drives the radius
    fn transformed(&self, matrix: &DAffine2) -> ShapeModel {
        let mut out = *self;
        out.set_center(matrix.transform_point2(self.center()));
        out.r.px = self.r.px * axis_scales(matrix).x;
        out.into()
    }

    fn outline(&self) -> Primitive {
        Primitive::Circle {
            center: self.center(),
            radius: self.r.px,
        }
    }
}

// ============================================================================
// Ellipse
// ============================================================================

/// `ellipse()`. Handles: `[center, x radius, y radius]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Ellipse {
    pub cx: Coord,
    pub cy: Coord,
    pub rx: Coord,
    pub ry: Coord,
    pub notation: Notation,
    pub reference_box: Option<BoxType>,
}

impl Ellipse {
    pub fn center(&self) -> DVec2 {
        dvec2(self.cx.px, self.cy.px)
    }

    pub fn radii(&self) -> DVec2 {
        dvec2(self.rx.px, self.ry.px)
    }

    fn set_center(&mut self, c: DVec2) {
        self.cx.px = c.x;
        self.cy.px = c.y;
    }
}

impl ShapeGeometry for Ellipse {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn reference_box(&self) -> Option<BoxType> {
        self.reference_box
    }

    fn translate(&mut self, delta: DVec2) {
        self.set_center(self.center() + delta);
    }

    fn handles(&self) -> Vec<DVec2> {
        let c = self.center();
        vec![c, c + dvec2(self.rx.px, 0.0), c + dvec2(0.0, self.ry.px)]
    }

    fn move_handle(&mut self, index: usize, to: DVec2) -> bool {
        match index {
            0 => self.set_center(to),
            1 => self.rx.px = (to.x - self.cx.px).abs(),
            2 => self.ry.px = (to.y - self.cy.px).abs(),
            _ => return false,
        }
        true
    }

    fn bounds(&self) -> Bounds {
        let c = self.center();
        Bounds::from_points([c - self.radii(), c + self.radii()])
    }

    fn transformed(&self, matrix: &DAffine2) -> ShapeModel {
        let scale = axis_scales(matrix);
        let mut out = *self;
        out.set_center(matrix.transform_point2(self.center()));
        out.rx.px = self.rx.px * scale.x;
        out.ry.px = self.ry.px * scale.y;
        out.into()
    }

    fn outline(&self) -> Primitive {
        Primitive::Ellipse {
            center: self.center(),
            radii: self.radii(),
        }
    }
}

// ============================================================================
// Rectangle
// ============================================================================

/// `rectangle()`. Handles: `[origin, far corner]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rectangle {
    pub x: Coord,
    pub y: Coord,
    pub w: Coord,
    pub h: Coord,
    pub rx: Option<Coord>,
    pub ry: Option<Coord>,
    pub reference_box: Option<BoxType>,
}

impl Rectangle {
    pub fn origin(&self) -> DVec2 {
        dvec2(self.x.px, self.y.px)
    }

    pub fn size(&self) -> DVec2 {
        dvec2(self.w.px, self.h.px)
    }

    pub fn radii(&self) -> DVec2 {
        let rx = self.rx.map_or(0.0, |c| c.px);
        let ry = self.ry.map_or(rx, |c| c.px);
        dvec2(rx, ry)
    }

    fn set_origin(&mut self, p: DVec2) {
        self.x.px = p.x;
        self.y.px = p.y;
    }
}

impl ShapeGeometry for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn reference_box(&self) -> Option<BoxType> {
        self.reference_box
    }

    fn translate(&mut self, delta: DVec2) {
        self.set_origin(self.origin() + delta);
    }

    fn handles(&self) -> Vec<DVec2> {
        vec![self.origin(), self.origin() + self.size()]
    }

    fn move_handle(&mut self, index: usize, to: DVec2) -> bool {
        match index {
            0 => self.set_origin(to),
            1 => {
                let size = (to - self.origin()).max(DVec2::ZERO);
                self.w.px = size.x;
                self.h.px = size.y;
            }
            _ => return false,
        }
        true
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points([self.origin(), self.origin() + self.size()])
    }

    // rotation cannot be expressed by rectangle(); corners go through the
    // matrix and the result is re-normalized to an axis-aligned box
    fn transformed(&self, matrix: &DAffine2) -> ShapeModel {
        let scale = axis_scales(matrix);
        let a = matrix.transform_point2(self.origin());
        let b = matrix.transform_point2(self.origin() + self.size());
        let mut out = *self;
        out.set_origin(a.min(b));
        let size = (b - a).abs();
        out.w.px = size.x;
        out.h.px = size.y;
        out.rx = self.rx.map(|c| c.with_px(c.px * scale.x));
        out.ry = self.ry.map(|c| c.with_px(c.px * scale.y));
        out.into()
    }

    fn outline(&self) -> Primitive {
        Primitive::Rect {
            origin: self.origin(),
            size: self.size(),
            radii: self.radii(),
        }
    }
}
