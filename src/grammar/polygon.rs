//! `polygon([<fill-rule>,]? <x> <y> [, <x> <y>]*)`

use pest::iterators::Pair;

use super::{ParseContext, match_value, read_lengths, read_reference_box};
use crate::Rule;
use crate::editor::defaults::MIN_VERTICES;
use crate::errors::ShapeError;
use crate::model::{Polygon, Vertex};
use crate::types::{Axis, BoxType, FillRule, LayoutBox};

pub(super) fn parse(value: &str, ctx: &ParseContext<'_>) -> Result<Option<Polygon>, ShapeError> {
    let Some(pair) = match_value(Rule::polygon_value, value) else {
        return Ok(None);
    };

    let mut args = None;
    let mut reference_box = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::polygon => args = inner.into_inner().next(),
            Rule::reference_box => reference_box = read_reference_box(&inner),
            _ => {}
        }
    }
    let Some(args) = args else {
        return Ok(None);
    };
    let box_type = ctx.box_type(reference_box);

    let mut fill_rule = None;
    let mut vertices = Vec::new();
    for inner in args.into_inner() {
        match inner.as_rule() {
            Rule::fill_rule => fill_rule = inner.as_str().parse::<FillRule>().ok(),
            Rule::vertex_list => {
                let read: Option<Vec<Vertex>> =
                    inner.into_inner().map(|v| read_vertex(v, ctx, box_type)).collect();
                let Some(read) = read else {
                    return Ok(None);
                };
                vertices = read;
            }
            _ => {}
        }
    }

    if vertices.len() < MIN_VERTICES {
        crate::log::trace!(count = vertices.len(), "polygon has too few vertices");
        return Ok(None);
    }

    Ok(Some(Polygon {
        vertices,
        fill_rule,
        reference_box,
    }))
}

fn read_vertex(pair: Pair<'_, Rule>, ctx: &ParseContext<'_>, box_type: BoxType) -> Option<Vertex> {
    let lengths = read_lengths(pair)?;
    let &[x, y] = lengths.as_slice() else {
        return None;
    };
    Some(Vertex::new(
        ctx.coord(x.length, Axis::Width, box_type),
        ctx.coord(y.length, Axis::Height, box_type),
    ))
}

/// The four corners of the box, clockwise from the top left
pub(super) fn infer(b: &LayoutBox, ctx: &ParseContext<'_>) -> Polygon {
    let corner = |x: f64, y: f64| Vertex::new(ctx.inferred(x), ctx.inferred(y));
    Polygon {
        vertices: vec![
            corner(0.0, 0.0),
            corner(b.width, 0.0),
            corner(b.width, b.height),
            corner(0.0, b.height),
        ],
        fill_rule: Some(FillRule::Nonzero),
        reference_box: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::StaticElement;
    use crate::types::{Coord, Unit};
    use glam::dvec2;

    fn parse_polygon(value: &str) -> Option<Polygon> {
        let el = StaticElement::new(800.0, 400.0);
        let ctx = ParseContext::new(&el, BoxType::ContentBox);
        parse(value, &ctx).expect("polygons never error")
    }

    #[test]
    fn mixed_units() {
        let p = parse_polygon("polygon(0 0, 50% 0, 100% 100%, 10em 25%)").unwrap();
        assert_eq!(p.vertices.len(), 4);
        assert_eq!(p.fill_rule, None);
        assert_eq!(p.vertices[1].x, Coord::new(400.0, Unit::Percent));
        assert_eq!(p.vertices[2].y, Coord::new(400.0, Unit::Percent));
        assert_eq!(p.vertices[3].point(), dvec2(160.0, 100.0));
        assert_eq!(p.vertices[3].x.unit, Unit::Em);
    }

    #[test]
    fn fill_rule_prefix() {
        let p = parse_polygon("polygon(EvenOdd, 0 0, 1px 0, 1px 1px)").unwrap();
        assert_eq!(p.fill_rule, Some(FillRule::Evenodd));
    }

    #[test]
    fn negative_vertices_are_allowed() {
        let p = parse_polygon("polygon(-10px -10px, 10px 0, 0 10px)").unwrap();
        assert_eq!(p.vertices[0].point(), dvec2(-10.0, -10.0));
    }

    #[test]
    fn reference_box_suffix() {
        let p = parse_polygon("polygon(0 0, 1px 0, 1px 1px) border-box").unwrap();
        assert_eq!(p.reference_box, Some(BoxType::BorderBox));
    }

    #[test]
    fn too_few_vertices_is_incomplete() {
        for value in [
            "polygon()",
            "polygon(nonzero)",
            "polygon(0 0)",
            "polygon(0 0, 10px 10px)",
            "polygon(0 0, 10px 10px, 5px)",
            "polygon(0 0, 10px 10px, 5px 5px,)",
        ] {
            assert_eq!(parse_polygon(value), None, "{value}");
        }
    }

    #[test]
    fn infer_corners() {
        let el = StaticElement::new(800.0, 400.0);
        let ctx = ParseContext::new(&el, BoxType::ContentBox);
        let p = infer(&LayoutBox::new(0.0, 0.0, 800.0, 400.0), &ctx);
        assert_eq!(
            p.points(),
            vec![dvec2(0.0, 0.0), dvec2(800.0, 0.0), dvec2(800.0, 400.0), dvec2(0.0, 400.0)]
        );
        assert_eq!(p.fill_rule, Some(FillRule::Nonzero));
    }
}
