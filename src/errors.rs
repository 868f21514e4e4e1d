//! Error types with rich diagnostics using miette
//!
//! Parse-time errors carry the offending shape value and a span so hosts can
//! underline the bad argument in their code editor.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::model::ShapeKind;

/// Name used for the source of shape values in diagnostics
const SOURCE_NAME: &str = "<shape>";

/// Build the named source used by every parse diagnostic
pub(crate) fn shape_source(value: &str) -> NamedSource<String> {
    NamedSource::new(SOURCE_NAME, value.to_string())
}

/// Everything that can go wrong while binding or parsing a shape value.
///
/// Incomplete values (too few polygon vertices, missing trailing arguments)
/// are not errors; parsers return `Ok(None)` for those and the editor infers
/// a shape from the element instead.
#[derive(Error, Diagnostic, Debug)]
pub enum ShapeError {
    #[error("no {expected} function in value")]
    #[diagnostic(
        code(css_shapes::parse::missing_shape_function),
        help("supported functions are polygon(), circle(), ellipse() and rectangle()")
    )]
    MissingShapeFunction {
        expected: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected {expected} here")]
        span: SourceSpan,
    },

    #[error("negative {what} is not allowed")]
    #[diagnostic(code(css_shapes::parse::invalid_geometry))]
    InvalidGeometry {
        what: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("this value is negative")]
        span: SourceSpan,
    },

    #[error("invalid reference box: {keyword}")]
    #[diagnostic(
        code(css_shapes::reference_box::invalid_box_type),
        help("use one of content-box, padding-box, border-box or margin-box")
    )]
    InvalidBoxType { keyword: String },

    #[error("target element is not attached to a document")]
    #[diagnostic(code(css_shapes::session::invalid_target))]
    InvalidTarget,
}

impl ShapeError {
    pub(crate) fn missing_function(expected: ShapeKind, value: &str) -> Self {
        ShapeError::MissingShapeFunction {
            expected: expected.function(),
            src: shape_source(value),
            span: (0, value.len()).into(),
        }
    }

    /// The value names no function at all, or one that is not a shape.
    pub(crate) fn unknown_function(value: &str) -> Self {
        let end = value.find('(').unwrap_or(value.len());
        ShapeError::MissingShapeFunction {
            expected: "shape",
            src: shape_source(value),
            span: (0, end).into(),
        }
    }

    pub(crate) fn negative(what: &'static str, value: &str, span: (usize, usize)) -> Self {
        ShapeError::InvalidGeometry {
            what,
            src: shape_source(value),
            span: (span.0, span.1 - span.0).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_geometry_points_at_argument() {
        let value = "circle(-10px, 0, 0)";
        let err = ShapeError::negative("radius", value, (7, 12));
        match err {
            ShapeError::InvalidGeometry { span, what, .. } => {
                assert_eq!(what, "radius");
                assert_eq!(span.offset(), 7);
                assert_eq!(span.len(), 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn messages_name_the_shape() {
        let err = ShapeError::missing_function(ShapeKind::Ellipse, "fake()");
        assert_eq!(err.to_string(), "no ellipse() function in value");
    }

    #[test]
    fn unknown_function_span_stops_at_paren() {
        let err = ShapeError::unknown_function("square(1px)");
        match err {
            ShapeError::MissingShapeFunction { span, expected, .. } => {
                assert_eq!(expected, "shape");
                assert_eq!(span.len(), 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
