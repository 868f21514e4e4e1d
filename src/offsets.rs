//! Document-absolute vs element-relative coordinates.
//!
//! Shape values are written relative to the reference box; the overlay draws
//! in document space. The offset between the two is the reference box origin
//! within the element, plus the element's viewport position, plus the page
//! scroll.

use glam::{DVec2, dvec2};

use crate::boxes::get_box;
use crate::dom::Element;
use crate::model::{ShapeGeometry, ShapeModel};
use crate::types::BoxType;

/// Translation from element-relative to document coordinates
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offsets {
    pub left: f64,
    pub top: f64,
}

impl Offsets {
    /// Read fresh offsets for `box_type` of `element`.
    pub fn compute(element: &dyn Element, box_type: BoxType) -> Offsets {
        let b = get_box(element, box_type);
        let rect = element.bounding_rect();
        let viewport = element.viewport();
        Offsets {
            left: b.left + rect.left + viewport.scroll_x,
            top: b.top + rect.top + viewport.scroll_y,
        }
    }

    pub fn as_vec(&self) -> DVec2 {
        dvec2(self.left, self.top)
    }

    /// Move `model` into document space.
    ///
    /// The model must be element-relative. Applying twice without a
    /// [`remove`](Offsets::remove) in between shifts it twice.
    pub fn apply(&self, model: &mut ShapeModel) {
        model.translate(self.as_vec());
    }

    /// Move `model` back to element-relative space. Must pair with an earlier
    /// [`apply`](Offsets::apply) of the same offsets.
    pub fn remove(&self, model: &mut ShapeModel) {
        model.translate(-self.as_vec());
    }
}
