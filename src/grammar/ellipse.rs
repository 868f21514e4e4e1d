//! `ellipse()` grammar: legacy `ellipse(cx, cy, rx, ry)` or
//! `ellipse([<rx> <ry>]? [at <position>]?)`.

use super::position::{Extent, RadiusArg, read_position, read_radius};
use super::{ParseContext, match_value, read_lengths, read_reference_box};
use crate::Rule;
use crate::errors::ShapeError;
use crate::model::{Ellipse, Notation};
use crate::types::{Axis, Coord, LayoutBox, Length};

pub(super) fn parse(value: &str, ctx: &ParseContext<'_>) -> Result<Option<Ellipse>, ShapeError> {
    let Some(pair) = match_value(Rule::ellipse_value, value) else {
        return Ok(None);
    };

    let mut args = None;
    let mut reference_box = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ellipse => args = inner.into_inner().next(),
            Rule::reference_box => reference_box = read_reference_box(&inner),
            _ => {}
        }
    }
    let Some(form) = args.and_then(|a| a.into_inner().next()) else {
        return Ok(None);
    };
    let box_type = ctx.box_type(reference_box);

    let (cx, cy, rx, ry, notation) = match form.as_rule() {
        Rule::comma_args => {
            let Some(lengths) = read_lengths(form) else {
                return Ok(None);
            };
            let &[cx, cy, rx, ry] = lengths.as_slice() else {
                return Ok(None);
            };
            (
                cx.length,
                cy.length,
                RadiusArg::Length(rx),
                RadiusArg::Length(ry),
                Notation::Legacy,
            )
        }
        Rule::ellipse_at => {
            let mut radii = Vec::with_capacity(2);
            let mut position = None;
            for part in form.into_inner() {
                match part.as_rule() {
                    Rule::radius => {
                        let Some(arg) = read_radius(part) else {
                            return Ok(None);
                        };
                        radii.push(arg);
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
            if radii.is_empty() && position.is_none() {
                return Ok(None);
            }
            let (cx, cy) = position.unwrap_or((Length::percent(50.0), Length::percent(50.0)));
            let default = RadiusArg::Extent(Extent::ClosestSide);
            let rx = radii.first().copied().unwrap_or(default);
            let ry = radii.get(1).copied().unwrap_or(default);
            (cx, cy, rx, ry, Notation::At)
        }
        _ => return Ok(None),
    };

    let cx = ctx.coord(cx, Axis::Width, box_type);
    let cy = ctx.coord(cy, Axis::Height, box_type);
    let b = ctx.layout_box(reference_box);
    let resolve = |arg: RadiusArg, axis: Axis, center: f64, size: f64| -> Result<Coord, ShapeError> {
        Ok(match arg {
            RadiusArg::Length(spanned) => {
                let spanned = spanned.non_negative("radius", value)?;
                ctx.coord(spanned.length, axis, box_type)
            }
            RadiusArg::Extent(extent) => Coord::px(extent.along(center, size)),
        })
    };
    let rx = resolve(rx, Axis::Width, cx.px, b.width)?;
    let ry = resolve(ry, Axis::Height, cy.px, b.height)?;

    Ok(Some(Ellipse {
        cx,
        cy,
        rx,
        ry,
        notation,
        reference_box,
    }))
}

pub(super) fn infer(b: &LayoutBox, ctx: &ParseContext<'_>) -> Ellipse {
    Ellipse {
        cx: ctx.inferred(b.width / 2.0),
        cy: ctx.inferred(b.height / 2.0),
        rx: ctx.inferred(b.width / 2.0),
        ry: ctx.inferred(b.height / 2.0),
        notation: Notation::Legacy,
        reference_box: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::StaticElement;
    use crate::types::{BoxType, Unit};

    fn parse_ellipse(value: &str) -> Result<Option<Ellipse>, ShapeError> {
        let el = StaticElement::new(800.0, 400.0);
        let ctx = ParseContext::new(&el, BoxType::ContentBox);
        parse(value, &ctx)
    }

    fn ellipse(value: &str) -> Ellipse {
        parse_ellipse(value).unwrap().expect("complete ellipse")
    }

    #[test]
    fn legacy_four_arguments() {
        let e = ellipse("ellipse(100px, 50%, 2em, 25%)");
        assert_eq!(e.cx, Coord::px(100.0));
        assert_eq!(e.cy, Coord::new(200.0, Unit::Percent));
        assert_eq!(e.rx, Coord::new(32.0, Unit::Em));
        assert_eq!(e.ry, Coord::new(100.0, Unit::Percent));
        assert_eq!(e.notation, Notation::Legacy);
    }

    #[test]
    fn legacy_needs_all_four() {
        assert!(parse_ellipse("ellipse(1px, 2px, 3px)").unwrap().is_none());
        assert!(parse_ellipse("ellipse(1px, 2px, 3px, 4px, 5px)").unwrap().is_none());
    }

    #[test]
    fn percent_radii_follow_their_axis() {
        let e = ellipse("ellipse(50% 50% at 50% 50%)");
        assert_eq!((e.rx.px, e.ry.px), (400.0, 200.0));
        assert_eq!(e.notation, Notation::At);
    }

    #[test]
    fn missing_radii_are_closest_side() {
        let e = ellipse("ellipse(at 100px 300px)");
        assert_eq!((e.rx.px, e.ry.px), (100.0, 100.0));
    }

    #[test]
    fn extent_keywords() {
        let e = ellipse("ellipse(farthest-side closest-side at 100px 300px)");
        assert_eq!((e.rx.px, e.ry.px), (700.0, 100.0));
    }

    #[test]
    fn radii_without_position_center() {
        let e = ellipse("ellipse(10px 20px)");
        assert_eq!((e.cx.px, e.cy.px), (400.0, 200.0));
    }

    #[test]
    fn negative_radius_is_invalid_geometry() {
        for value in ["ellipse(0, 0, -1px, 2px)", "ellipse(10px -20px at 0 0)"] {
            let err = parse_ellipse(value).unwrap_err();
            assert!(matches!(err, ShapeError::InvalidGeometry { .. }), "{value}");
        }
    }

    #[test]
    fn incomplete() {
        for value in ["ellipse()", "ellipse(10px at)", "ellipse(10px 20px 30px)"] {
            assert!(parse_ellipse(value).unwrap().is_none(), "{value}");
        }
    }

    #[test]
    fn infer_fills_box() {
        let el = StaticElement::new(800.0, 400.0);
        let ctx = ParseContext::new(&el, BoxType::ContentBox);
        let e = infer(&LayoutBox::new(0.0, 0.0, 800.0, 400.0), &ctx);
        assert_eq!((e.cx.px, e.cy.px, e.rx.px, e.ry.px), (400.0, 200.0, 400.0, 200.0));
    }
}
