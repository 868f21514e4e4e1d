//! Editor configuration.

use crate::editor::defaults;
use crate::types::{BoxType, Unit};

/// Settings for one editing session
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
    /// Radius of vertex and handle discs, and of the pointer hit area around
    /// them and around polygon edges
    pub point_radius: f64,
    /// Reference box for values that do not name one
    pub default_box: BoxType,
    /// Unit written back for coordinates the editor inferred
    pub inferred_unit: Unit,
    /// Double-click removal stops at this many polygon vertices
    pub min_vertices: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            point_radius: defaults::POINT_RADIUS,
            default_box: defaults::DEFAULT_BOX,
            inferred_unit: defaults::INFERRED_UNIT,
            min_vertices: defaults::MIN_VERTICES,
        }
    }
}

impl EditorConfig {
    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.point_radius = radius.max(0.0);
        self
    }

    pub fn with_default_box(mut self, box_type: BoxType) -> Self {
        self.default_box = box_type;
        self
    }

    pub fn with_inferred_unit(mut self, unit: Unit) -> Self {
        self.inferred_unit = unit;
        self
    }

    /// Never below 3: a polygon needs three vertices to enclose anything.
    pub fn with_min_vertices(mut self, count: usize) -> Self {
        self.min_vertices = count.max(defaults::MIN_VERTICES);
        self
    }
}
