//! Shape function parsing and inference.
//!
//! Parsing is two-stage. A superficial `name(...)` check fails fast with
//! [`ShapeError::MissingShapeFunction`]; the full grammar match then either
//! produces a model or `None` for incomplete input, in which case callers fall
//! back to [`infer`].

mod circle;
mod ellipse;
mod polygon;
mod position;
mod rectangle;

use pest::Parser;
use pest::iterators::Pair;

use crate::boxes::get_box;
use crate::dom::Element;
use crate::errors::ShapeError;
use crate::model::{ShapeKind, ShapeModel};
use crate::types::{Axis, BoxType, Coord, Length, LayoutBox, NumericError, Unit};
use crate::units::to_pixels;
use crate::{Rule, ShapeParser};

/// What a parser needs to resolve lengths to pixels
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub element: &'a dyn Element,
    /// Box used when the value names none
    pub default_box: BoxType,
    /// Unit given to inferred coordinates
    pub inferred_unit: Unit,
}

impl<'a> ParseContext<'a> {
    pub fn new(element: &'a dyn Element, default_box: BoxType) -> Self {
        ParseContext {
            element,
            default_box,
            inferred_unit: Unit::Px,
        }
    }

    pub fn with_inferred_unit(mut self, unit: Unit) -> Self {
        self.inferred_unit = unit;
        self
    }

    pub(crate) fn box_type(&self, explicit: Option<BoxType>) -> BoxType {
        explicit.unwrap_or(self.default_box)
    }

    pub(crate) fn layout_box(&self, explicit: Option<BoxType>) -> LayoutBox {
        get_box(self.element, self.box_type(explicit))
    }

    /// Resolve a length to a pixel coordinate that remembers its unit
    pub(crate) fn coord(&self, length: Length, axis: Axis, box_type: BoxType) -> Coord {
        Coord::new(to_pixels(length, self.element, axis, box_type), length.unit)
    }

    fn inferred(&self, px: f64) -> Coord {
        Coord::new(px, self.inferred_unit)
    }
}

/// Pick the shape kind from the function name before the first `(`.
pub fn detect_kind(value: &str) -> Result<ShapeKind, ShapeError> {
    let value = value.trim();
    let Some((name, _)) = value.split_once('(') else {
        return Err(ShapeError::unknown_function(value));
    };
    ShapeKind::from_name(name).ok_or_else(|| ShapeError::unknown_function(value))
}

/// Superficial `name(...)` test, done before any grammar work.
pub fn check_function(kind: ShapeKind, value: &str) -> Result<(), ShapeError> {
    let trimmed = value.trim();
    let name = kind.name();
    let rest = trimmed
        .get(..name.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(name))
        .and_then(|_| trimmed.get(name.len()..));
    match rest {
        Some(rest) if rest.starts_with('(') && rest.contains(')') => Ok(()),
        _ => Err(ShapeError::missing_function(kind, trimmed)),
    }
}

/// Parse `value` as a `kind` shape.
///
/// Returns `Ok(None)` when the value is the right function but incomplete.
pub fn parse(kind: ShapeKind, value: &str, ctx: &ParseContext<'_>) -> Result<Option<ShapeModel>, ShapeError> {
    check_function(kind, value)?;
    let value = value.trim();
    let model = match kind {
        ShapeKind::Polygon => polygon::parse(value, ctx)?.map(ShapeModel::from),
        ShapeKind::Circle => circle::parse(value, ctx)?.map(ShapeModel::from),
        ShapeKind::Ellipse => ellipse::parse(value, ctx)?.map(ShapeModel::from),
        ShapeKind::Rectangle => rectangle::parse(value, ctx)?.map(ShapeModel::from),
    };
    // lengths past the f64 range in pixels
    let model = model.filter(|m| m.is_finite());
    if model.is_none() {
        crate::log::debug!(%kind, value, "incomplete shape value");
    }
    Ok(model)
}

/// Derive a default `kind` shape from the element's default reference box.
pub fn infer(kind: ShapeKind, ctx: &ParseContext<'_>) -> ShapeModel {
    let b = ctx.layout_box(None);
    if b.width == 0.0 || b.height == 0.0 {
        crate::log::warn!(%kind, ?b, "inferring shape from an empty box");
    }
    crate::log::debug!(%kind, width = b.width, height = b.height, "inferring shape");
    match kind {
        ShapeKind::Polygon => polygon::infer(&b, ctx).into(),
        ShapeKind::Circle => circle::infer(&b, ctx).into(),
        ShapeKind::Ellipse => ellipse::infer(&b, ctx).into(),
        ShapeKind::Rectangle => rectangle::infer(&b, ctx).into(),
    }
}

/// Parse `value`, inferring from the element when it is incomplete.
pub fn parse_or_infer(kind: ShapeKind, value: &str, ctx: &ParseContext<'_>) -> Result<ShapeModel, ShapeError> {
    Ok(match parse(kind, value, ctx)? {
        Some(model) => model,
        None => infer(kind, ctx),
    })
}

// ============================================================================
// Pair helpers shared by the per-shape parsers
// ============================================================================

/// Match a whole value against `rule`; `None` when it does not match.
pub(crate) fn match_value(rule: Rule, value: &str) -> Option<Pair<'_, Rule>> {
    match ShapeParser::parse(rule, value) {
        Ok(mut pairs) => pairs.next(),
        Err(_err) => {
            crate::log::trace!(?rule, error = %_err, "grammar did not match");
            None
        }
    }
}

/// A length as written, with its byte span in the value
#[derive(Clone, Copy, Debug)]
pub(crate) struct Spanned {
    pub length: Length,
    pub span: (usize, usize),
}

impl Spanned {
    /// Reject negative radii/dimensions.
    pub fn non_negative(self, what: &'static str, value: &str) -> Result<Self, ShapeError> {
        match Length::try_non_negative(self.length.value, self.length.unit) {
            Err(NumericError::Negative) => Err(ShapeError::negative(what, value, self.span)),
            _ => Ok(self),
        }
    }
}

/// Read a `length` pair.
///
/// `None` when the number does not fit a finite `f64`; callers treat the
/// value as incomplete.
pub(crate) fn read_length(pair: Pair<'_, Rule>) -> Option<Spanned> {
    let span = (pair.as_span().start(), pair.as_span().end());
    let mut value = 0.0;
    let mut unit = Unit::Px;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => value = inner.as_str().parse().unwrap_or(0.0),
            Rule::unit => unit = Unit::lenient(inner.as_str()),
            _ => {}
        }
    }
    match Length::try_new(value, unit) {
        Ok(length) => Some(Spanned { length, span }),
        Err(_err) => {
            crate::log::debug!(start = span.0, end = span.1, error = %_err, "unusable length");
            None
        }
    }
}

/// Read every `length` directly under `pair`, or `None` if any is unusable
pub(crate) fn read_lengths(pair: Pair<'_, Rule>) -> Option<Vec<Spanned>> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::length)
        .map(read_length)
        .collect()
}

pub(crate) fn read_reference_box(pair: &Pair<'_, Rule>) -> Option<BoxType> {
    pair.as_str().parse().ok()
}
