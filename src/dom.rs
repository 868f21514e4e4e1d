//! Layout and style queries against the target element.
//!
//! The editor never touches a real DOM. Hosts implement [`Element`] over
//! whatever they have (a live page, a devtools protocol mirror, a layout
//! snapshot); [`StaticElement`] covers the snapshot case.

use std::rc::Rc;

/// A viewport-relative rectangle, as returned by `getBoundingClientRect()`
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Widths of the four sides of a border, padding or margin
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub const ZERO: Edges = Edges::uniform(0.0);

    pub const fn uniform(width: f64) -> Self {
        Edges {
            top: width,
            right: width,
            bottom: width,
            left: width,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// The subset of computed style the editor reads
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedStyle {
    pub border: Edges,
    pub padding: Edges,
    pub margin: Edges,
    /// Computed `font-size` in pixels
    pub font_size: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        ComputedStyle {
            border: Edges::ZERO,
            padding: Edges::ZERO,
            margin: Edges::ZERO,
            font_size: 16.0,
        }
    }
}

/// Window metrics: inner size and scroll position
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Layout/style query capability for the element a shape is bound to.
///
/// Every method is a fresh read; callers must not assume values stay valid
/// across a resize.
pub trait Element {
    /// Whether the element is attached to a document
    fn is_attached(&self) -> bool;

    /// Border box of the element relative to the viewport
    fn bounding_rect(&self) -> ClientRect;

    fn computed_style(&self) -> ComputedStyle;

    /// Computed `font-size` of the document root, for `rem`
    fn root_font_size(&self) -> f64;

    fn viewport(&self) -> Viewport;
}

impl<T: Element + ?Sized> Element for &T {
    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn bounding_rect(&self) -> ClientRect {
        (**self).bounding_rect()
    }

    fn computed_style(&self) -> ComputedStyle {
        (**self).computed_style()
    }

    fn root_font_size(&self) -> f64 {
        (**self).root_font_size()
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}

impl<T: Element + ?Sized> Element for Rc<T> {
    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn bounding_rect(&self) -> ClientRect {
        (**self).bounding_rect()
    }

    fn computed_style(&self) -> ComputedStyle {
        (**self).computed_style()
    }

    fn root_font_size(&self) -> f64 {
        (**self).root_font_size()
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}

/// An element described by plain layout data.
///
/// The border box size is derived from the content size plus padding and
/// border, the way `box-sizing: content-box` lays an element out.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticElement {
    pub position: (f64, f64),
    pub content_size: (f64, f64),
    pub style: ComputedStyle,
    pub root_font_size: f64,
    pub viewport: Viewport,
    pub attached: bool,
}

impl StaticElement {
    /// An attached element with the given content size at the viewport origin
    pub fn new(width: f64, height: f64) -> Self {
        StaticElement {
            position: (0.0, 0.0),
            content_size: (width, height),
            style: ComputedStyle::default(),
            root_font_size: 16.0,
            viewport: Viewport {
                width: 1024.0,
                height: 768.0,
                scroll_x: 0.0,
                scroll_y: 0.0,
            },
            attached: true,
        }
    }

    /// Viewport-relative position of the border box
    pub fn with_position(mut self, left: f64, top: f64) -> Self {
        self.position = (left, top);
        self
    }

    pub fn with_border(mut self, border: Edges) -> Self {
        self.style.border = border;
        self
    }

    pub fn with_padding(mut self, padding: Edges) -> Self {
        self.style.padding = padding;
        self
    }

    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.style.margin = margin;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.style.font_size = font_size;
        self
    }

    pub fn with_root_font_size(mut self, font_size: f64) -> Self {
        self.root_font_size = font_size;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn detached(mut self) -> Self {
        self.attached = false;
        self
    }

    /// Change the content size, as a responsive layout would on resize
    pub fn resize(&mut self, width: f64, height: f64) {
        self.content_size = (width, height);
    }

    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.viewport.scroll_x = x;
        self.viewport.scroll_y = y;
    }
}

impl Element for StaticElement {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn bounding_rect(&self) -> ClientRect {
        let style = &self.style;
        ClientRect {
            left: self.position.0,
            top: self.position.1,
            width: self.content_size.0 + style.padding.horizontal() + style.border.horizontal(),
            height: self.content_size.1 + style.padding.vertical() + style.border.vertical(),
        }
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style
    }

    fn root_font_size(&self) -> f64 {
        self.root_font_size
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
