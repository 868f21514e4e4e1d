//! Default editor settings (pixels unless noted)

use crate::types::{BoxType, Unit};

/// Radius of a vertex/handle disc; also the pointer hit radius
pub const POINT_RADIUS: f64 = 4.0;
/// Fewest vertices a polygon can have
pub const MIN_VERTICES: usize = 3;
pub const DEFAULT_BOX: BoxType = BoxType::ContentBox;
pub const INFERRED_UNIT: Unit = Unit::Px;
