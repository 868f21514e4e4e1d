//! Conversion between CSS lengths and absolute pixels.
//!
//! Both directions share one table of "pixels per unit", so a value converted
//! to pixels and back lands on the value it started from (up to the 1/20 px
//! rounding every result goes through).

use crate::boxes::get_box;
use crate::dom::Element;
use crate::types::{Axis, BoxType, Length, Unit};

pub const PX_PER_IN: f64 = 96.0;
pub const PX_PER_CM: f64 = PX_PER_IN / 2.54;
pub const PX_PER_MM: f64 = PX_PER_CM / 10.0;
pub const PX_PER_PT: f64 = PX_PER_IN / 72.0;
pub const PX_PER_PC: f64 = PX_PER_PT * 12.0;

/// Round to the nearest 1/20 px.
///
/// Every pixel value produced by the converter goes through this so repeated
/// round-trips cannot drift.
#[inline]
pub fn round_to_twentieth(x: f64) -> f64 {
    (x * 20.0).round() / 20.0
}

/// How many pixels one `unit` is worth for this element and axis.
pub fn pixels_per_unit(unit: Unit, element: &dyn Element, axis: Axis, box_type: BoxType) -> f64 {
    match unit {
        Unit::Px => 1.0,
        Unit::In => PX_PER_IN,
        Unit::Cm => PX_PER_CM,
        Unit::Mm => PX_PER_MM,
        Unit::Pt => PX_PER_PT,
        Unit::Pc => PX_PER_PC,
        Unit::Em => element.computed_style().font_size,
        Unit::Rem => element.root_font_size(),
        Unit::Vw => element.viewport().width / 100.0,
        Unit::Vh => element.viewport().height / 100.0,
        Unit::Percent => {
            let b = get_box(element, box_type);
            let basis = match axis {
                Axis::Width => b.width,
                Axis::Height => b.height,
                Axis::Radius => b.radius_basis(),
            };
            basis / 100.0
        }
    }
}

/// Resolve a CSS length to pixels.
///
/// A length too large for the pixel range comes back non-finite; the shape
/// parsers treat such a value as incomplete.
pub fn to_pixels(length: Length, element: &dyn Element, axis: Axis, box_type: BoxType) -> f64 {
    let factor = pixels_per_unit(length.unit, element, axis, box_type);
    let px = round_to_twentieth(length.value * factor);
    if !px.is_finite() {
        crate::log::warn!(%length, ?axis, "length overflows the pixel range");
    }
    px
}

/// Express a pixel value in `unit`.
///
/// When the unit has no size (an empty reference box, a zero font size) the
/// result is `0` in that unit.
pub fn from_pixels(px: f64, unit: Unit, element: &dyn Element, axis: Axis, box_type: BoxType) -> Length {
    let factor = pixels_per_unit(unit, element, axis, box_type);
    if factor == 0.0 || !factor.is_finite() {
        crate::log::warn!(%unit, ?axis, "unit has no size for this element, writing 0");
        return Length::new(0.0, unit);
    }
    let value = round_to_twentieth(px / factor);
    if !value.is_finite() {
        crate::log::warn!(px, %unit, ?axis, "pixel value out of range, writing 0");
        return Length::new(0.0, unit);
    }
    Length::new(value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{StaticElement, Viewport};

    fn target() -> StaticElement {
        StaticElement::new(800.0, 400.0)
            .with_font_size(20.0)
            .with_root_font_size(10.0)
            .with_viewport(Viewport {
                width: 1200.0,
                height: 900.0,
                scroll_x: 0.0,
                scroll_y: 0.0,
            })
    }

    fn px(text: &str, axis: Axis) -> f64 {
        to_pixels(Length::parse(text), &target(), axis, BoxType::ContentBox)
    }

    #[test]
    fn absolute_units() {
        assert_eq!(px("10px", Axis::Width), 10.0);
        assert_eq!(px("1in", Axis::Width), 96.0);
        assert_eq!(px("2.54cm", Axis::Width), 96.0);
        assert_eq!(px("25.4mm", Axis::Width), 96.0);
        assert_eq!(px("72pt", Axis::Width), 96.0);
        assert_eq!(px("6pc", Axis::Width), 96.0);
    }

    #[test]
    fn font_and_viewport_units() {
        assert_eq!(px("2em", Axis::Width), 40.0);
        assert_eq!(px("2rem", Axis::Width), 20.0);
        assert_eq!(px("10vw", Axis::Width), 120.0);
        assert_eq!(px("10vh", Axis::Height), 90.0);
    }

    #[test]
    fn percentages_follow_axis() {
        assert_eq!(px("50%", Axis::Width), 400.0);
        assert_eq!(px("50%", Axis::Height), 200.0);
    }

    #[test]
    fn radius_percentage_uses_normalized_diagonal() {
        let expected = round_to_twentieth(0.5 * (800.0f64.powi(2) + 400.0f64.powi(2)).sqrt() / 2f64.sqrt());
        assert_eq!(px("50%", Axis::Radius), expected);
        assert_eq!(expected, 316.25);
    }

    #[test]
    fn results_are_rounded_to_twentieth() {
        assert_eq!(px("0.333px", Axis::Width), 0.35);
        assert_eq!(round_to_twentieth(10.024), 10.0);
        assert_eq!(round_to_twentieth(10.026), 10.05);
    }

    #[test]
    fn unknown_and_garbage_lengths() {
        assert_eq!(px("12furlongs", Axis::Width), 12.0);
        assert_eq!(px("nope", Axis::Width), 0.0);
    }

    #[test]
    fn round_trip_every_unit_and_axis() {
        let el = target();
        let cases = [
            Length::new(12.0, Unit::Px),
            Length::new(1.5, Unit::In),
            Length::new(2.5, Unit::Cm),
            Length::new(15.0, Unit::Mm),
            Length::new(18.0, Unit::Pt),
            Length::new(3.0, Unit::Pc),
            Length::new(1.3, Unit::Em),
            Length::new(4.0, Unit::Rem),
            Length::new(12.5, Unit::Vw),
            Length::new(7.0, Unit::Vh),
            Length::new(33.0, Unit::Percent),
            Length::new(-20.0, Unit::Percent),
        ];
        for axis in [Axis::Width, Axis::Height, Axis::Radius] {
            for length in cases {
                let px = to_pixels(length, &el, axis, BoxType::ContentBox);
                let back = from_pixels(px, length.unit, &el, axis, BoxType::ContentBox);
                assert_eq!(back.unit, length.unit);
                assert!(
                    (back.value - length.value).abs() <= 0.05,
                    "{length} on {axis:?}: {px}px came back as {back}"
                );
            }
        }
    }

    #[test]
    fn overflow_is_reported_not_written() {
        let el = target();
        let px = to_pixels(Length::new(f64::MAX, Unit::In), &el, Axis::Width, BoxType::ContentBox);
        assert!(px.is_infinite());
        let back = from_pixels(f64::INFINITY, Unit::Px, &el, Axis::Width, BoxType::ContentBox);
        assert_eq!(back, Length::px(0.0));
        assert_eq!(back.to_string(), "0px");
    }

    #[test]
    fn empty_box_percentages_write_zero() {
        let el = StaticElement::new(0.0, 0.0);
        let back = from_pixels(25.0, Unit::Percent, &el, Axis::Width, BoxType::ContentBox);
        assert_eq!(back, Length::percent(0.0));
    }
}
