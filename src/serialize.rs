//! CSS output for shape models.
//!
//! The model must be element-relative (offsets removed) before it gets here.
//! Each coordinate is converted back into the unit it was read in; position
//! components are first rounded up to whole pixels.

use crate::dom::Element;
use crate::model::{Circle, Ellipse, Notation, Polygon, Rectangle, ShapeGeometry, ShapeModel};
use crate::types::{Axis, BoxType, Coord, Length};
use crate::units::{from_pixels, round_to_twentieth};

struct Writer<'a> {
    element: &'a dyn Element,
    box_type: BoxType,
}

impl Writer<'_> {
    /// A positional component: whole pixels, rounded up
    fn position(&self, c: Coord, axis: Axis) -> Length {
        let px = round_to_twentieth(c.px).ceil();
        from_pixels(px, c.unit, self.element, axis, self.box_type)
    }

    /// A radius or dimension, kept at 1/20 px precision
    fn extent(&self, c: Coord, axis: Axis) -> Length {
        from_pixels(c.px, c.unit, self.element, axis, self.box_type)
    }
}

/// Serialize `model` as a CSS shape function.
///
/// `default_box` is used for percentages when the model names no box.
pub fn to_css_value(model: &ShapeModel, element: &dyn Element, default_box: BoxType) -> String {
    let w = Writer {
        element,
        box_type: model.reference_box().unwrap_or(default_box),
    };
    let mut out = match model {
        ShapeModel::Polygon(p) => polygon(&w, p),
        ShapeModel::Circle(c) => circle(&w, c),
        ShapeModel::Ellipse(e) => ellipse(&w, e),
        ShapeModel::Rectangle(r) => rectangle(&w, r),
    };
    if let Some(b) = model.reference_box() {
        out.push_str(&format!(" {b}"));
    }
    out
}

fn polygon(w: &Writer<'_>, p: &Polygon) -> String {
    let mut parts = Vec::with_capacity(p.vertices.len() + 1);
    if let Some(rule) = p.fill_rule {
        parts.push(rule.to_string());
    }
    parts.extend(p.vertices.iter().map(|v| {
        format!(
            "{} {}",
            w.position(v.x, Axis::Width),
            w.position(v.y, Axis::Height)
        )
    }));
    format!("polygon({})", parts.join(", "))
}

fn circle(w: &Writer<'_>, c: &Circle) -> String {
    let cx = w.position(c.cx, Axis::Width);
    let cy = w.position(c.cy, Axis::Height);
    let r = w.extent(c.r, Axis::Radius);
    match c.notation {
        Notation::Legacy => format!("circle({r}, {cx}, {cy})"),
        Notation::At => format!("circle({r} at {cx} {cy})"),
    }
}

fn ellipse(w: &Writer<'_>, e: &Ellipse) -> String {
    let cx = w.position(e.cx, Axis::Width);
    let cy = w.position(e.cy, Axis::Height);
    let rx = w.extent(e.rx, Axis::Width);
    let ry = w.extent(e.ry, Axis::Height);
    match e.notation {
        Notation::Legacy => format!("ellipse({cx}, {cy}, {rx}, {ry})"),
        Notation::At => format!("ellipse({rx} {ry} at {cx} {cy})"),
    }
}

fn rectangle(w: &Writer<'_>, r: &Rectangle) -> String {
    let mut out = format!(
        "rectangle({}, {}, {}, {}",
        w.position(r.x, Axis::Width),
        w.position(r.y, Axis::Height),
        w.extent(r.w, Axis::Width),
        w.extent(r.h, Axis::Height),
    );
    let rx = r.rx.map(|c| w.extent(c, Axis::Width));
    let ry = r.ry.map(|c| w.extent(c, Axis::Height));
    match (rx, ry) {
        (Some(rx), Some(ry)) if rx != ry => out.push_str(&format!(", {rx}, {ry}")),
        (Some(r), _) | (None, Some(r)) => out.push_str(&format!(", {r}")),
        (None, None) => {}
    }
    out.push(')');
    out
}
