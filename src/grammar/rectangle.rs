//! `rectangle(x, y, w, h [, rx [, ry]])`

use super::{ParseContext, match_value, read_lengths, read_reference_box};
use crate::Rule;
use crate::errors::ShapeError;
use crate::model::Rectangle;
use crate::types::{Axis, LayoutBox};

pub(super) fn parse(value: &str, ctx: &ParseContext<'_>) -> Result<Option<Rectangle>, ShapeError> {
    let Some(pair) = match_value(Rule::rectangle_value, value) else {
        return Ok(None);
    };

    let mut lengths = Vec::new();
    let mut reference_box = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::rectangle => {
                if let Some(list) = inner.into_inner().next() {
                    let Some(read) = read_lengths(list) else {
                        return Ok(None);
                    };
                    lengths = read;
                }
            }
            Rule::reference_box => reference_box = read_reference_box(&inner),
            _ => {}
        }
    }
    if !(4..=6).contains(&lengths.len()) {
        return Ok(None);
    }
    let box_type = ctx.box_type(reference_box);

    let w = lengths[2].non_negative("width", value)?;
    let h = lengths[3].non_negative("height", value)?;
    let rx = lengths
        .get(4)
        .map(|s| s.non_negative("radius", value))
        .transpose()?;
    let ry = lengths
        .get(5)
        .map(|s| s.non_negative("radius", value))
        .transpose()?
        .or(rx);

    Ok(Some(Rectangle {
        x: ctx.coord(lengths[0].length, Axis::Width, box_type),
        y: ctx.coord(lengths[1].length, Axis::Height, box_type),
        w: ctx.coord(w.length, Axis::Width, box_type),
        h: ctx.coord(h.length, Axis::Height, box_type),
        rx: rx.map(|s| ctx.coord(s.length, Axis::Width, box_type)),
        ry: ry.map(|s| ctx.coord(s.length, Axis::Height, box_type)),
        reference_box,
    }))
}

/// The whole box, square corners
pub(super) fn infer(b: &LayoutBox, ctx: &ParseContext<'_>) -> Rectangle {
    Rectangle {
        x: ctx.inferred(0.0),
        y: ctx.inferred(0.0),
        w: ctx.inferred(b.width),
        h: ctx.inferred(b.height),
        rx: None,
        ry: None,
        reference_box: None,
    }
}
