//! Strongly-typed lengths, units and boxes for the shape model.
//!
//! Design goals:
//! - Every CSS length remembers the unit it was written in
//! - Pixel geometry lives in `glam` vectors, unit bookkeeping lives here
//! - Keywords parse through `FromStr` so illegal keywords never reach geometry

use glam::{DVec2, dvec2};
use std::fmt;
use std::str::FromStr;

use crate::errors::ShapeError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Format a number the way CSS wants it: no trailing `.0`, no `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// CSS length units understood by the converter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    #[default]
    Px,
    In,
    Cm,
    Mm,
    Pt,
    Pc,
    Em,
    Rem,
    Vw,
    Vh,
    Percent,
}

impl Unit {
    /// Look up a unit by its CSS spelling (ASCII case-insensitive).
    ///
    /// The empty string is `px`: unitless numbers are pixels.
    pub fn from_css(s: &str) -> Option<Unit> {
        let unit = match s.to_ascii_lowercase().as_str() {
            "" | "px" => Unit::Px,
            "in" => Unit::In,
            "cm" => Unit::Cm,
            "mm" => Unit::Mm,
            "pt" => Unit::Pt,
            "pc" => Unit::Pc,
            "em" => Unit::Em,
            "rem" => Unit::Rem,
            "vw" => Unit::Vw,
            "vh" => Unit::Vh,
            "%" => Unit::Percent,
            _ => return None,
        };
        Some(unit)
    }

    /// Like [`Unit::from_css`] but unknown units fall back to `px`.
    pub fn lenient(s: &str) -> Unit {
        Unit::from_css(s).unwrap_or_else(|| {
            crate::log::warn!(unit = s, "unknown unit, treating as px");
            Unit::Px
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::Em => "em",
            Unit::Rem => "rem",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Percent => "%",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CSS length: a finite value paired with the unit it is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Length {
    pub value: f64,
    pub unit: Unit,
}

impl Length {
    pub const ZERO: Length = Length {
        value: 0.0,
        unit: Unit::Px,
    };

    /// Create a length (unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub const fn new(value: f64, unit: Unit) -> Length {
        Length { value, unit }
    }

    #[inline]
    pub const fn px(value: f64) -> Length {
        Length::new(value, Unit::Px)
    }

    #[inline]
    pub const fn percent(value: f64) -> Length {
        Length::new(value, Unit::Percent)
    }

    /// Create a Length with validation (rejects NaN/infinite)
    pub fn try_new(value: f64, unit: Unit) -> Result<Length, NumericError> {
        if value.is_nan() {
            Err(NumericError::NaN)
        } else if value.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length { value, unit })
        }
    }

    /// Create a non-negative Length with validation
    pub fn try_non_negative(value: f64, unit: Unit) -> Result<Length, NumericError> {
        let length = Length::try_new(value, unit)?;
        if length.value < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(length)
        }
    }

    /// Parse a single CSS length such as `12.5px`, `-3em` or `50%`.
    ///
    /// Unparseable text resolves to `0px`; unknown units resolve to `px`.
    pub fn parse(text: &str) -> Length {
        let text = text.trim();
        let split = text
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let (number, unit) = text.split_at(split);
        match number.parse::<f64>() {
            Ok(value) if value.is_finite() => Length::new(value, Unit::lenient(unit)),
            _ => Length::ZERO,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

/// Which dimension of the reference box a percentage resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal positions and widths
    Width,
    /// Vertical positions and heights
    Height,
    /// Circle radii: the box diagonal divided by sqrt(2)
    Radius,
}

/// CSS reference box keywords
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BoxType {
    #[default]
    ContentBox,
    PaddingBox,
    BorderBox,
    MarginBox,
}

impl BoxType {
    pub fn as_str(self) -> &'static str {
        match self {
            BoxType::ContentBox => "content-box",
            BoxType::PaddingBox => "padding-box",
            BoxType::BorderBox => "border-box",
            BoxType::MarginBox => "margin-box",
        }
    }
}

impl FromStr for BoxType {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content-box" => Ok(BoxType::ContentBox),
            "padding-box" => Ok(BoxType::PaddingBox),
            "border-box" => Ok(BoxType::BorderBox),
            "margin-box" => Ok(BoxType::MarginBox),
            _ => Err(ShapeError::InvalidBoxType {
                keyword: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BoxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four CSS boxes, in pixels, relative to the border box origin.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        LayoutBox {
            top,
            left,
            width,
            height,
        }
    }

    pub fn size(&self) -> DVec2 {
        dvec2(self.width, self.height)
    }

    /// Basis for radius percentages: `sqrt(w² + h²) / sqrt(2)`
    pub fn radius_basis(&self) -> f64 {
        self.width.hypot(self.height) / std::f64::consts::SQRT_2
    }
}

/// Polygon fill rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    Nonzero,
    Evenodd,
}

impl FillRule {
    pub fn as_str(self) -> &'static str {
        match self {
            FillRule::Nonzero => "nonzero",
            FillRule::Evenodd => "evenodd",
        }
    }
}

impl FromStr for FillRule {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nonzero" => Ok(FillRule::Nonzero),
            "evenodd" => Ok(FillRule::Evenodd),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FillRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coordinate in pixels plus the unit to write it back in.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Coord {
    pub px: f64,
    pub unit: Unit,
}

impl Coord {
    #[inline]
    pub const fn new(px: f64, unit: Unit) -> Self {
        Coord { px, unit }
    }

    #[inline]
    pub const fn px(px: f64) -> Self {
        Coord::new(px, Unit::Px)
    }

    /// Same unit, new pixel value
    #[inline]
    pub fn with_px(self, px: f64) -> Self {
        Coord { px, ..self }
    }
}

/// Axis-aligned bounding box in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        Bounds {
            min: DVec2::splat(f64::INFINITY),
            max: DVec2::splat(f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Self {
        let mut bounds = Bounds::new();
        for p in points {
            bounds.expand_point(p);
        }
        bounds
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}
