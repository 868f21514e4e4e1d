//! Geometry engine for interactively editing CSS Shapes values.
//!
//! A shape function string (`polygon()`, `circle()`, `ellipse()`,
//! `rectangle()`) is parsed against a target [`Element`] into a unit-aware
//! pixel model, edited through pointer input or a free transform, and written
//! back to CSS in the units it was read in.
//!
//! ```
//! use css_shapes_editor::{StaticElement, BoxType, normalize};
//!
//! let el = StaticElement::new(800.0, 400.0);
//! let css = normalize("circle()", &el, BoxType::ContentBox).unwrap();
//! assert_eq!(css, "circle(200px, 400px, 200px)");
//! ```

use pest_derive::Parser;

pub mod boxes;
pub mod config;
pub mod dom;
pub mod editor;
pub mod errors;
pub mod grammar;
mod log;
pub mod model;
pub mod offsets;
pub mod registry;
pub mod serialize;
pub mod session;
pub mod surface;
pub mod types;
pub mod units;

pub use config::EditorConfig;
pub use dom::{Element, StaticElement};
pub use editor::{EditState, GeometryEditor, NullHandles, Outcome, TransformHandles, TransformOptions};
pub use errors::ShapeError;
pub use model::{Circle, Ellipse, Polygon, Rectangle, ShapeGeometry, ShapeKind, ShapeModel, Vertex};
pub use offsets::Offsets;
pub use registry::{DocumentId, SessionRegistry};
pub use session::{EditorEvent, EditorSession, EventKind, ListenerId};
pub use surface::{NullSurface, Primitive, RecordingSurface, Surface};
pub use types::{Axis, BoxType, Coord, FillRule, LayoutBox, Length, Unit};

#[derive(Parser)]
#[grammar = "shapes.pest"]
pub struct ShapeParser;

/// Parse any shape value, inferring from `element` when it is incomplete.
pub fn parse_shape(value: &str, element: &dyn Element, default_box: BoxType) -> Result<ShapeModel, ShapeError> {
    let kind = grammar::detect_kind(value)?;
    let ctx = grammar::ParseContext::new(element, default_box);
    grammar::parse_or_infer(kind, value, &ctx)
}

/// Parse and re-serialize a shape value.
///
/// Incomplete values come back as the inferred shape.
pub fn normalize(value: &str, element: &dyn Element, default_box: BoxType) -> Result<String, ShapeError> {
    let model = parse_shape(value, element, default_box)?;
    Ok(serialize::to_css_value(&model, element, default_box))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_polygon_value() {
        let input = "polygon(nonzero, 0 0, 100px 0, 50% 100%)";
        let result = ShapeParser::parse(Rule::polygon_value, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_polygon_with_box() {
        let input = "polygon(0 0, 1px 1px, 2px 0) margin-box";
        let result = ShapeParser::parse(Rule::polygon_value, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_empty_functions() {
        for (rule, input) in [
            (Rule::polygon_value, "polygon()"),
            (Rule::circle_value, "circle()"),
            (Rule::ellipse_value, "ellipse()"),
            (Rule::rectangle_value, "rectangle()"),
        ] {
            let result = ShapeParser::parse(rule, input);
            assert!(result.is_ok(), "Failed to parse {input}: {:?}", result.err());
        }
    }

    #[test]
    fn parse_legacy_circle() {
        let input = "circle(50%, 10px, -2.5em)";
        let result = ShapeParser::parse(Rule::circle_value, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_circle_at() {
        let input = "circle(closest-side at left 20%)";
        let result = ShapeParser::parse(Rule::circle_value, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_ellipse_at() {
        let input = "ellipse(10px 20px at center)";
        let result = ShapeParser::parse(Rule::ellipse_value, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_rectangle_with_radii() {
        let input = "rectangle(0, 0, 100%, 50%, 4px, 8px)";
        let result = ShapeParser::parse(Rule::rectangle_value, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_decimal_forms() {
        for input in ["1.5", ".5", "-3.", "+7"] {
            let result = ShapeParser::parse(Rule::number, input);
            assert!(result.is_ok(), "Failed to parse {input}: {:?}", result.err());
        }
    }

    #[test]
    fn reject_trailing_garbage() {
        let input = "circle(10px) foo";
        let result = ShapeParser::parse(Rule::circle_value, input);
        assert!(result.is_err());
    }

    #[test]
    fn reject_odd_vertex() {
        let input = "polygon(0 0, 1px)";
        let result = ShapeParser::parse(Rule::polygon_value, input);
        assert!(result.is_err());
    }

    #[test]
    fn normalize_infers_incomplete() {
        let el = StaticElement::new(800.0, 400.0);
        assert_eq!(
            normalize("rectangle(1px)", &el, BoxType::ContentBox).unwrap(),
            "rectangle(0px, 0px, 800px, 400px)"
        );
    }

    #[test]
    fn normalize_rejects_non_shapes() {
        let el = StaticElement::new(800.0, 400.0);
        assert!(normalize("url(shape.png)", &el, BoxType::ContentBox).is_err());
    }
}
