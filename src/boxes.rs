//! Reference box resolution.
//!
//! All boxes are relative to the element's border box. They are recomputed on
//! every call because border, padding and margin can change between reads.

use crate::dom::Element;
use crate::errors::ShapeError;
use crate::types::{BoxType, LayoutBox};

/// Compute one of the four CSS boxes for `element`.
pub fn get_box(element: &dyn Element, box_type: BoxType) -> LayoutBox {
    let rect = element.bounding_rect();
    let style = element.computed_style();
    let (border, padding, margin) = (style.border, style.padding, style.margin);
    let (width, height) = (rect.width, rect.height);

    match box_type {
        BoxType::ContentBox => LayoutBox {
            top: border.top + padding.top,
            left: border.left + padding.left,
            width: (width - border.horizontal() - padding.horizontal()).max(0.0),
            height: (height - border.vertical() - padding.vertical()).max(0.0),
        },
        BoxType::PaddingBox => LayoutBox {
            top: border.top,
            left: border.left,
            width: (width - border.horizontal()).max(0.0),
            height: (height - border.vertical()).max(0.0),
        },
        BoxType::BorderBox => LayoutBox {
            top: 0.0,
            left: 0.0,
            width,
            height,
        },
        // may sit above/left of the border box origin
        BoxType::MarginBox => LayoutBox {
            top: -margin.top,
            left: -margin.left,
            width: width + margin.horizontal(),
            height: height + margin.vertical(),
        },
    }
}

/// Compute a box from its CSS keyword.
pub fn get_box_by_name(element: &dyn Element, keyword: &str) -> Result<LayoutBox, ShapeError> {
    let box_type = keyword.parse::<BoxType>()?;
    Ok(get_box(element, box_type))
}
