//! `<position>` and radius arguments of the `at` notation.

use glam::DVec2;
use pest::iterators::Pair;

use super::{Spanned, read_length};
use crate::Rule;
use crate::types::Length;

/// `closest-side` / `farthest-side`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Extent {
    ClosestSide,
    FarthestSide,
}

impl Extent {
    /// Resolve along one axis for a center at `center` in a box of `size`
    pub fn along(self, center: f64, size: f64) -> f64 {
        let (near, far) = (center.abs(), (size - center).abs());
        match self {
            Extent::ClosestSide => near.min(far),
            Extent::FarthestSide => near.max(far),
        }
    }

    /// Resolve for a circle: the nearest or farthest of all four sides
    pub fn for_circle(self, center: DVec2, size: DVec2) -> f64 {
        let (x, y) = (self.along(center.x, size.x), self.along(center.y, size.y));
        match self {
            Extent::ClosestSide => x.min(y),
            Extent::FarthestSide => x.max(y),
        }
    }
}

/// A radius as written: a length or an extent keyword
#[derive(Clone, Copy, Debug)]
pub(crate) enum RadiusArg {
    Length(Spanned),
    Extent(Extent),
}

/// `None` when a length radius is unusable
pub(crate) fn read_radius(pair: Pair<'_, Rule>) -> Option<RadiusArg> {
    let extent = if pair.as_str().trim().eq_ignore_ascii_case("farthest-side") {
        Extent::FarthestSide
    } else {
        Extent::ClosestSide
    };
    match pair.into_inner().next() {
        Some(inner) if inner.as_rule() == Rule::length => read_length(inner).map(RadiusArg::Length),
        _ => Some(RadiusArg::Extent(extent)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Keyword {
    Left,
    Center,
    Right,
    Top,
    Bottom,
}

impl Keyword {
    fn parse(s: &str) -> Keyword {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Keyword::Left,
            "right" => Keyword::Right,
            "top" => Keyword::Top,
            "bottom" => Keyword::Bottom,
            _ => Keyword::Center,
        }
    }

    fn as_length(self) -> Length {
        Length::percent(match self {
            Keyword::Left | Keyword::Top => 0.0,
            Keyword::Center => 50.0,
            Keyword::Right | Keyword::Bottom => 100.0,
        })
    }
}

#[derive(Clone, Copy, Debug)]
enum Component {
    Length(Length),
    Keyword(Keyword),
}

impl Component {
    fn as_length(self) -> Length {
        match self {
            Component::Length(l) => l,
            Component::Keyword(k) => k.as_length(),
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Component::Keyword(Keyword::Top | Keyword::Bottom))
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Component::Keyword(Keyword::Left | Keyword::Right))
    }
}

fn read_component(pair: Pair<'_, Rule>) -> Option<Component> {
    match pair.into_inner().next() {
        Some(inner) if inner.as_rule() == Rule::length => read_length(inner).map(|s| Component::Length(s.length)),
        Some(inner) => Some(Component::Keyword(Keyword::parse(inner.as_str()))),
        None => Some(Component::Keyword(Keyword::Center)),
    }
}

/// Read a `position` pair into `(x, y)` lengths.
///
/// Keywords become percentages; a vertical keyword written first is swapped
/// into the y slot. `None` when a length component is unusable.
pub(crate) fn read_position(pair: Pair<'_, Rule>) -> Option<(Length, Length)> {
    let center = Length::percent(50.0);
    let components: Vec<Component> = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::position_component)
        .map(read_component)
        .collect::<Option<_>>()?;

    let position = match components.as_slice() {
        [only] if only.is_vertical() => (center, only.as_length()),
        [only] => (only.as_length(), center),
        [a, b] if a.is_vertical() || b.is_horizontal() => (b.as_length(), a.as_length()),
        [a, b] => (a.as_length(), b.as_length()),
        _ => (center, center),
    };
    Some(position)
}
