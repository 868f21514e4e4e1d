//! `circle()` grammar.
//!
//! Legacy form: `circle(r, cx, cy)` with missing trailing centers defaulting
//! to `50%`. Modern form: `circle(<radius>? [at <position>]?)`.

use super::position::{Extent, RadiusArg, read_position, read_radius};
use super::{ParseContext, Spanned, match_value, read_lengths, read_reference_box};
use crate::Rule;
use crate::errors::ShapeError;
use crate::model::{Circle, Notation};
use crate::types::{Axis, Coord, LayoutBox, Length};

pub(super) fn parse(value: &str, ctx: &ParseContext<'_>) -> Result<Option<Circle>, ShapeError> {
    let Some(pair) = match_value(Rule::circle_value, value) else {
        return Ok(None);
    };

    let mut args = None;
    let mut reference_box = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::circle => args = inner.into_inner().next(),
            Rule::reference_box => reference_box = read_reference_box(&inner),
            _ => {}
        }
    }
    let Some(form) = args.and_then(|a| a.into_inner().next()) else {
        return Ok(None);
    };
    let box_type = ctx.box_type(reference_box);

    let (radius, cx, cy, notation) = match form.as_rule() {
        Rule::comma_args => {
            let Some(lengths) = read_lengths(form) else {
                return Ok(None);
            };
            if lengths.len() > 3 {
                return Ok(None);
            }
            let Some(&r) = lengths.first() else {
                return Ok(None);
            };
            let center = |i: usize| lengths.get(i).map_or(Length::percent(50.0), |s| s.length);
            (RadiusArg::Length(r), center(1), center(2), Notation::Legacy)
        }
        Rule::circle_at => {
            let mut radius = None;
            let mut position = None;
            for part in form.into_inner() {
                match part.as_rule() {
                    Rule::radius => {
                        let Some(arg) = read_radius(part) else {
                            return Ok(None);
                        };
                        radius = Some(arg);
                    }
                    Rule::position => {
                        let Some(at) = read_position(part) else {
                            return Ok(None);
                        };
                        position = Some(at);
                    }
                    _ => {}
                }
            }
            if radius.is_none() && position.is_none() {
                return Ok(None);
            }
            let (cx, cy) = position.unwrap_or((Length::percent(50.0), Length::percent(50.0)));
            let radius = radius.unwrap_or(RadiusArg::Extent(Extent::ClosestSide));
            (radius, cx, cy, Notation::At)
        }
        _ => return Ok(None),
    };

    let cx = ctx.coord(cx, Axis::Width, box_type);
    let cy = ctx.coord(cy, Axis::Height, box_type);
    let r = match radius {
        RadiusArg::Length(spanned) => {
            let Spanned { length, .. } = spanned.non_negative("radius", value)?;
            ctx.coord(length, Axis::Radius, box_type)
        }
        RadiusArg::Extent(extent) => {
            let b = ctx.layout_box(reference_box);
            Coord::px(extent.for_circle(glam::dvec2(cx.px, cy.px), b.size()))
        }
    };

    Ok(Some(Circle {
        cx,
        cy,
        r,
        notation,
        reference_box,
    }))
}

/// Center of the box, radius to the closest edge
pub(super) fn infer(b: &LayoutBox, ctx: &ParseContext<'_>) -> Circle {
    Circle {
        cx: ctx.inferred(b.width / 2.0),
        cy: ctx.inferred(b.height / 2.0),
        r: ctx.inferred(b.width.min(b.height) / 2.0),
        notation: Notation::Legacy,
        reference_box: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::StaticElement;
    use crate::types::{BoxType, Unit};
    use crate::units::round_to_twentieth;

    fn parse_circle(value: &str) -> Result<Option<Circle>, ShapeError> {
        let el = StaticElement::new(800.0, 400.0);
        let ctx = ParseContext::new(&el, BoxType::ContentBox);
        parse(value, &ctx)
    }

    fn circle(value: &str) -> Circle {
        parse_circle(value)
            .expect("should not error")
            .expect("should be complete")
    }

    #[test]
    fn legacy_pixels() {
        let c = circle("circle(100px, 100px, 100px)");
        assert_eq!(c.r, Coord::px(100.0));
        assert_eq!(c.cx, Coord::px(100.0));
        assert_eq!(c.cy, Coord::px(100.0));
        assert_eq!(c.notation, Notation::Legacy);
    }

    #[test]
    fn legacy_unitless_center() {
        let c = circle("circle(100px, 0, 0)");
        assert_eq!(c.cx, Coord::px(0.0));
        assert_eq!(c.cy, Coord::px(0.0));
    }

    #[test]
    fn legacy_percentages() {
        let c = circle("circle(50%, 50%, 50%)");
        let r = round_to_twentieth(0.5 * (800.0f64.hypot(400.0) / 2f64.sqrt()));
        assert_eq!(c.r, Coord::new(r, Unit::Percent));
        assert_eq!(c.cx, Coord::new(400.0, Unit::Percent));
        assert_eq!(c.cy, Coord::new(200.0, Unit::Percent));
    }

    #[test]
    fn legacy_zero_percent_radius() {
        let c = circle("circle(0%, 400px, 200px)");
        assert_eq!(c.r, Coord::new(0.0, Unit::Percent));
    }

    #[test]
    fn legacy_missing_centers_default_to_half() {
        let c = circle("circle(10px, 25%)");
        assert_eq!(c.cx, Coord::new(200.0, Unit::Percent));
        assert_eq!(c.cy, Coord::new(200.0, Unit::Percent));
    }

    #[test]
    fn too_many_arguments_is_incomplete() {
        assert!(parse_circle("circle(1px, 2px, 3px, 4px)").unwrap().is_none());
    }

    #[test]
    fn modern_notation() {
        let c = circle("circle(50px at 100px 10%)");
        assert_eq!(c.r, Coord::px(50.0));
        assert_eq!(c.cx, Coord::px(100.0));
        assert_eq!(c.cy, Coord::new(40.0, Unit::Percent));
        assert_eq!(c.notation, Notation::At);
    }

    #[test]
    fn modern_radius_only_centers() {
        let c = circle("circle(50%)");
        assert_eq!(c.cx, Coord::new(400.0, Unit::Percent));
        assert_eq!(c.cy, Coord::new(200.0, Unit::Percent));
    }

    #[test]
    fn modern_without_radius_is_closest_side() {
        let c = circle("circle(at 100px center)");
        assert_eq!(c.r, Coord::px(100.0));
    }

    #[test]
    fn farthest_side() {
        let c = circle("CIRCLE(farthest-side at left top)");
        assert_eq!(c.cx, Coord::new(0.0, Unit::Percent));
        assert_eq!(c.r, Coord::px(800.0));
    }

    #[test]
    fn reference_box_suffix() {
        let el = StaticElement::new(800.0, 400.0).with_padding(crate::dom::Edges::uniform(10.0));
        let ctx = ParseContext::new(&el, BoxType::ContentBox);
        let c = parse("circle(10px at 50% 50%) padding-box", &ctx).unwrap().unwrap();
        assert_eq!(c.reference_box, Some(BoxType::PaddingBox));
        assert_eq!(c.cx, Coord::new(410.0, Unit::Percent));
    }

    #[test]
    fn negative_center_is_fine() {
        let c = circle("circle(100px, -100px, 100px)");
        assert_eq!(c.cx, Coord::px(-100.0));
        assert!(parse_circle("circle(100px at -5px -5px)").is_ok());
    }

    #[test]
    fn negative_radius_is_invalid_geometry() {
        for value in ["circle(-100px, 100px, 100px)", "circle(-1px at 0 0)", "circle(-10%)"] {
            let err = parse_circle(value).unwrap_err();
            assert!(matches!(err, ShapeError::InvalidGeometry { what: "radius", .. }), "{value}");
        }
    }

    #[test]
    fn incomplete_values() {
        for value in ["circle()", "circle(50% at)", "circle(at)", "circle(,)"] {
            assert!(parse_circle(value).unwrap().is_none(), "{value}");
        }
    }

    #[test]
    fn infer_closest_edge() {
        let el = StaticElement::new(800.0, 400.0);
        let ctx = ParseContext::new(&el, BoxType::ContentBox);
        let c = infer(&LayoutBox::new(0.0, 0.0, 800.0, 400.0), &ctx);
        assert_eq!((c.cx.px, c.cy.px, c.r.px), (400.0, 200.0, 200.0));
        assert_eq!(c.r.unit, Unit::Px);
    }
}
