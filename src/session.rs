//! Editing sessions: one shape value bound to one element.
//!
//! The session ties the pieces together. It parses (or infers) the model,
//! moves it into document space for drawing, routes pointer input to the
//! [`GeometryEditor`], redraws the surface and reports CSS values back out
//! through listeners.

use std::fmt;

use glam::{DAffine2, DVec2};

use crate::config::EditorConfig;
use crate::dom::Element;
use crate::editor::{EditState, GeometryEditor, Outcome, TransformHandles};
use crate::errors::ShapeError;
use crate::grammar::{ParseContext, detect_kind, parse_or_infer};
use crate::model::{ShapeGeometry, ShapeKind, ShapeModel};
use crate::offsets::Offsets;
use crate::serialize::to_css_value;
use crate::surface::Surface;
use crate::types::BoxType;

/// Which events a listener wants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    ShapeChange,
    Removed,
}

/// Something a session tells its host about
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// The session is set up and drawn
    Ready,
    /// The shape changed; `value` is the new CSS value
    ShapeChange { value: String },
    /// The session was torn down
    Removed,
}

impl EditorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EditorEvent::Ready => EventKind::Ready,
            EditorEvent::ShapeChange { .. } => EventKind::ShapeChange,
            EditorEvent::Removed => EventKind::Removed,
        }
    }
}

/// Handle returned by [`EditorSession::on`], for [`EditorSession::off`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    kind: EventKind,
    callback: Box<dyn FnMut(&EditorEvent)>,
}

/// An interactive editor for one shape value on one element.
pub struct EditorSession<E: Element, S: Surface, H: TransformHandles> {
    element: E,
    surface: S,
    handles: H,
    config: EditorConfig,
    /// Last value bound or emitted, element-relative
    value: String,
    editor: GeometryEditor,
    box_type: BoxType,
    offsets: Offsets,
    listeners: Vec<Listener>,
    next_listener: u64,
    removed: bool,
}

impl<E: Element, S: Surface, H: TransformHandles> fmt::Debug for EditorSession<E, S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("value", &self.value)
            .field("state", &self.editor.state())
            .field("box_type", &self.box_type)
            .field("offsets", &self.offsets)
            .field("listeners", &self.listeners.len())
            .field("removed", &self.removed)
            .finish()
    }
}

impl<E: Element, S: Surface, H: TransformHandles> EditorSession<E, S, H> {
    /// Bind `value` to `element` and draw it.
    ///
    /// Fails when the element is detached, when the value names no shape
    /// function, or when it carries a negative radius or dimension. Values
    /// that are merely incomplete are replaced by a shape inferred from the
    /// element.
    pub fn new(element: E, value: &str, surface: S, handles: H, config: EditorConfig) -> Result<Self, ShapeError> {
        if !element.is_attached() {
            return Err(ShapeError::InvalidTarget);
        }
        let kind = detect_kind(value)?;
        let mut model = parse_model(&element, &config, kind, value)?;
        let box_type = model.reference_box().unwrap_or(config.default_box);
        let offsets = Offsets::compute(&element, box_type);
        offsets.apply(&mut model);

        let mut session = EditorSession {
            editor: GeometryEditor::new(model, &config),
            element,
            surface,
            handles,
            config,
            value: value.trim().to_string(),
            box_type,
            offsets,
            listeners: Vec::new(),
            next_listener: 0,
            removed: false,
        };
        crate::log::debug!(%kind, value, ?box_type, "editor session ready");
        session.draw();
        Ok(session)
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Mutable access for hosts whose element snapshot changes; follow with
    /// [`refresh`](Self::refresh).
    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn handles(&self) -> &H {
        &self.handles
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn kind(&self) -> ShapeKind {
        self.editor.kind()
    }

    pub fn state(&self) -> EditState {
        self.editor.state()
    }

    pub fn box_type(&self) -> BoxType {
        self.box_type
    }

    pub fn offsets(&self) -> Offsets {
        self.offsets
    }

    /// The live model, in document coordinates
    pub fn model(&self) -> &ShapeModel {
        self.editor.model()
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// The current shape as an element-relative CSS value.
    pub fn css_value(&self) -> String {
        let mut model = self.editor.model().clone();
        self.offsets.remove(&mut model);
        to_css_value(&model, &self.element, self.config.default_box)
    }

    /// Bind a new value.
    ///
    /// The same function name re-parses in place and keeps transform mode.
    /// A different one swaps in a fresh editor for the new shape kind. On
    /// error the session is left as it was.
    pub fn update(&mut self, value: &str) -> Result<(), ShapeError> {
        if self.removed {
            return Ok(());
        }
        let kind = detect_kind(value)?;
        let mut model = parse_model(&self.element, &self.config, kind, value)?;

        let was_transforming = self.editor.leave_transform(&mut self.handles);
        self.box_type = model.reference_box().unwrap_or(self.config.default_box);
        self.offsets = Offsets::compute(&self.element, self.box_type);
        self.offsets.apply(&mut model);

        if kind == self.editor.kind() {
            self.editor.replace_model(model);
            if was_transforming {
                self.editor.enter_transform(&mut self.handles);
            }
        } else {
            crate::log::debug!(from = %self.editor.kind(), to = %kind, "swapping shape editor");
            self.editor = GeometryEditor::new(model, &self.config);
        }
        self.value = value.trim().to_string();
        self.draw();
        Ok(())
    }

    /// Re-read layout after the element or viewport changed size.
    ///
    /// Lengths are re-resolved from the last CSS value, so percentages and
    /// viewport units follow the new layout.
    pub fn refresh(&mut self) -> Result<(), ShapeError> {
        if self.removed {
            return Ok(());
        }
        let kind = self.editor.kind();
        let mut model = parse_model(&self.element, &self.config, kind, &self.value)?;

        let was_transforming = self.editor.leave_transform(&mut self.handles);
        self.box_type = model.reference_box().unwrap_or(self.config.default_box);
        self.offsets = Offsets::compute(&self.element, self.box_type);
        self.offsets.apply(&mut model);
        self.editor.replace_model(model);
        if was_transforming {
            self.editor.enter_transform(&mut self.handles);
        }
        crate::log::debug!(offsets = ?self.offsets, "refreshed layout");
        self.draw();
        Ok(())
    }

    /// Tear the session down. Further input is ignored.
    pub fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.editor.leave_transform(&mut self.handles);
        self.surface.clear();
        self.emit(EditorEvent::Removed);
        self.listeners.clear();
        self.removed = true;
    }

    /// Listen for `kind` events.
    ///
    /// A `Ready` listener runs right away: a constructed session is always
    /// ready.
    pub fn on(&mut self, kind: EventKind, callback: impl FnMut(&EditorEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        let mut listener = Listener {
            id,
            kind,
            callback: Box::new(callback),
        };
        if kind == EventKind::Ready && !self.removed {
            (listener.callback)(&EditorEvent::Ready);
        }
        self.listeners.push(listener);
        id
    }

    /// Stop a listener. Returns `false` if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, p: DVec2) {
        if !self.removed {
            let outcome = self.editor.pointer_down(p);
            self.settle(outcome);
        }
    }

    pub fn pointer_move(&mut self, p: DVec2) {
        if !self.removed {
            let outcome = self.editor.pointer_move(p);
            self.settle(outcome);
        }
    }

    pub fn pointer_up(&mut self) {
        if !self.removed {
            let outcome = self.editor.pointer_up();
            self.settle(outcome);
        }
    }

    pub fn double_click(&mut self, p: DVec2) {
        if !self.removed {
            let outcome = self.editor.double_click(p);
            self.settle(outcome);
        }
    }

    pub fn enter_transform(&mut self) {
        if !self.removed && self.editor.enter_transform(&mut self.handles) {
            self.draw();
        }
    }

    pub fn leave_transform(&mut self) {
        if !self.removed && self.editor.leave_transform(&mut self.handles) {
            self.draw();
        }
    }

    pub fn toggle_transform(&mut self) {
        if self.editor.is_transforming() {
            self.leave_transform();
        } else {
            self.enter_transform();
        }
    }

    /// Matrix callback for the transform widget, relative to when transform
    /// mode was entered.
    pub fn transform_update(&mut self, matrix: DAffine2) {
        if !self.removed {
            let outcome = self.editor.apply_transform(&matrix);
            self.settle(outcome);
        }
    }

    fn settle(&mut self, outcome: Outcome) {
        if outcome.needs_redraw() {
            self.draw();
        }
        if outcome.changed() {
            self.value = self.css_value();
            let value = self.value.clone();
            self.emit(EditorEvent::ShapeChange { value });
        }
    }

    fn draw(&mut self) {
        let frame = self.editor.scene();
        self.surface.draw(&frame);
    }

    fn emit(&mut self, event: EditorEvent) {
        let kind = event.kind();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(&event);
        }
    }
}

fn parse_model(
    element: &dyn Element,
    config: &EditorConfig,
    kind: ShapeKind,
    value: &str,
) -> Result<ShapeModel, ShapeError> {
    let ctx = ParseContext::new(element, config.default_box).with_inferred_unit(config.inferred_unit);
    parse_or_infer(kind, value, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::StaticElement;
    use crate::editor::NullHandles;
    use crate::surface::{NullSurface, RecordingSurface};
    use glam::dvec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Session = EditorSession<StaticElement, RecordingSurface, NullHandles>;

    fn session(value: &str) -> Session {
        EditorSession::new(
            StaticElement::new(800.0, 400.0),
            value,
            RecordingSurface::default(),
            NullHandles,
            EditorConfig::default(),
        )
        .expect("session should construct")
    }

    fn record(session: &mut Session) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.on(EventKind::ShapeChange, move |e| {
            if let EditorEvent::ShapeChange { value } = e {
                sink.borrow_mut().push(value.clone());
            }
        });
        seen
    }

    #[test]
    fn detached_target_is_rejected() {
        let err = EditorSession::new(
            StaticElement::new(10.0, 10.0).detached(),
            "circle()",
            NullSurface,
            NullHandles,
            EditorConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ShapeError::InvalidTarget));
    }

    #[test]
    fn unknown_function_is_rejected() {
        let err = EditorSession::new(
            StaticElement::new(10.0, 10.0),
            "inset(10px)",
            NullSurface,
            NullHandles,
            EditorConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ShapeError::MissingShapeFunction { .. }));
    }

    #[test]
    fn draws_on_construction() {
        let s = session("polygon()");
        assert_eq!(s.surface().frames_drawn, 1);
        // outline plus four vertex handles
        assert_eq!(s.surface().frame.len(), 5);
    }

    #[test]
    fn ready_listener_runs_immediately() {
        let mut s = session("circle()");
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();
        s.on(EventKind::Ready, move |_| *sink.borrow_mut() += 1);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn drag_emits_shape_change() {
        let mut s = session("circle(100px, 100px, 100px)");
        let seen = record(&mut s);
        s.pointer_down(dvec2(100.0, 100.0));
        assert!(seen.borrow().is_empty());
        s.pointer_move(dvec2(150.0, 120.0));
        s.pointer_up();
        assert_eq!(*seen.borrow(), vec!["circle(100px, 150px, 120px)".to_string()]);
        assert_eq!(s.css_value(), "circle(100px, 150px, 120px)");
    }

    #[test]
    fn off_stops_delivery() {
        let mut s = session("circle(100px, 100px, 100px)");
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();
        let id = s.on(EventKind::ShapeChange, move |_| *sink.borrow_mut() += 1);
        assert!(s.off(id));
        assert!(!s.off(id));
        s.pointer_down(dvec2(100.0, 100.0));
        s.pointer_move(dvec2(0.0, 0.0));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn update_same_kind_keeps_editor() {
        let mut s = session("polygon()");
        s.enter_transform();
        s.update("polygon(0 0, 10px 0, 10px 10px)").unwrap();
        assert!(s.editor.is_transforming());
        assert_eq!(s.css_value(), "polygon(0px 0px, 10px 0px, 10px 10px)");
    }

    #[test]
    fn update_other_kind_swaps_variant() {
        let mut s = session("polygon()");
        s.enter_transform();
        s.update("ellipse()").unwrap();
        assert_eq!(s.kind(), ShapeKind::Ellipse);
        assert_eq!(s.state(), EditState::Idle);
        assert_eq!(s.css_value(), "ellipse(400px, 200px, 400px, 200px)");
    }

    #[test]
    fn failed_update_leaves_session_alone() {
        let mut s = session("circle(10px, 20px, 30px)");
        assert!(s.update("circle(-10px, 20px, 30px)").is_err());
        assert!(s.update("square(1px)").is_err());
        assert_eq!(s.css_value(), "circle(10px, 20px, 30px)");
    }

    #[test]
    fn refresh_follows_percentages() {
        let mut s = session("circle(10px, 50%, 50%)");
        assert_eq!(s.model().handles()[0], dvec2(400.0, 200.0));
        s.element_mut().resize(200.0, 100.0);
        s.refresh().unwrap();
        assert_eq!(s.model().handles()[0], dvec2(100.0, 50.0));
        assert_eq!(s.css_value(), "circle(10px, 50%, 50%)");
    }

    #[test]
    fn removed_session_ignores_input() {
        let mut s = session("polygon()");
        let removed = Rc::new(RefCell::new(false));
        let sink = removed.clone();
        s.on(EventKind::Removed, move |_| *sink.borrow_mut() = true);
        let seen = record(&mut s);
        s.remove();
        assert!(*removed.borrow());
        assert!(s.surface().frame.is_empty());
        let before = s.model().clone();
        s.pointer_down(dvec2(0.0, 200.0));
        assert!(seen.borrow().is_empty());
        assert_eq!(s.model(), &before);
        assert!(s.is_removed());
    }
}
