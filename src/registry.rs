//! Sessions per document.
//!
//! A host that edits several pages (tabs, frames, live-preview windows) keeps
//! at most one session per document here instead of in global state.

use std::collections::HashMap;

use crate::dom::Element;
use crate::editor::TransformHandles;
use crate::errors::ShapeError;
use crate::session::EditorSession;
use crate::surface::Surface;

/// Host-assigned identifier of a document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// At most one live session per document
pub struct SessionRegistry<E: Element, S: Surface, H: TransformHandles> {
    sessions: HashMap<DocumentId, EditorSession<E, S, H>>,
}

impl<E: Element, S: Surface, H: TransformHandles> Default for SessionRegistry<E, S, H> {
    fn default() -> Self {
        SessionRegistry {
            sessions: HashMap::new(),
        }
    }
}

impl<E: Element, S: Surface, H: TransformHandles> SessionRegistry<E, S, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `session` the one for `doc`.
    ///
    /// A session already registered for `doc` is removed and returned.
    pub fn insert(&mut self, doc: DocumentId, session: EditorSession<E, S, H>) -> Option<EditorSession<E, S, H>> {
        let mut old = self.sessions.insert(doc, session)?;
        crate::log::debug!(?doc, "replacing editor session");
        old.remove();
        Some(old)
    }

    pub fn get(&self, doc: DocumentId) -> Option<&EditorSession<E, S, H>> {
        self.sessions.get(&doc)
    }

    pub fn get_mut(&mut self, doc: DocumentId) -> Option<&mut EditorSession<E, S, H>> {
        self.sessions.get_mut(&doc)
    }

    /// Tear down and drop the session for `doc`.
    pub fn remove(&mut self, doc: DocumentId) -> Option<EditorSession<E, S, H>> {
        let mut session = self.sessions.remove(&doc)?;
        session.remove();
        Some(session)
    }

    /// Re-read layout for every session, e.g. after a window resize.
    ///
    /// Stops at the first error; sessions before it are refreshed.
    pub fn refresh_all(&mut self) -> Result<(), ShapeError> {
        for session in self.sessions.values_mut() {
            session.refresh()?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
