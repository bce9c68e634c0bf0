//! Application model: open documents, the views (tabs) onto them, and the
//! shared clipboard.
//!
//! Why a separate `View` type?
//! ---------------------------
//! A document can be shown in several tabs at once. Each tab needs its own
//! cursor, selection, edit mode and scroll position while sharing the bytes
//! and the undo history. `View` owns the per-tab pieces; `Document` (in
//! `core-state`) owns the shared ones.
//!
//! Core invariants (must hold after every public call):
//! * Every `View::document` names a live document slot.
//! * A document slot is live iff at least one view references it.
//! * `active` is `None` iff there are no views, otherwise it names a view.
//! * Document names are unique among live documents.
//!
//! Documents live in an arena of slots addressed by [`DocumentId`]; ids are
//! never reused, so a stale id resolves to `None` rather than to an
//! unrelated document.
//!
//! Command dispatch obtains an [`EditContext`], a disjoint mutable borrow of
//! one view, its document and the clipboard.

use core_buffer::ByteBuffer;
use core_state::{
    Clipboard, CursorSelection, Document, EditModeController, UNDO_HISTORY_MAX, UndoEngine,
};
use tracing::{debug, info};

mod layout;
mod viewport;
pub use layout::{
    CELLS_PER_BYTE, DEFAULT_GROUP, Geometry, LayoutRegion, address_column_width, address_label,
    num_hex_digits, printable,
};
pub use viewport::{ViewportScroller, compute_scroll_target};

/// Stable identifier for a `View`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub usize);

/// Stable identifier for an open `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub usize);

#[derive(Debug, Clone)]
pub struct View {
    pub id: ViewId,
    pub document: DocumentId,
    pub selection: CursorSelection,
    pub edit: EditModeController,
    pub scroller: ViewportScroller,
}

impl View {
    pub fn new(id: ViewId, document: DocumentId) -> Self {
        Self {
            id,
            document,
            selection: CursorSelection::new(),
            edit: EditModeController::new(),
            scroller: ViewportScroller::new(),
        }
    }

    /// Recompute geometry for the current region and re-clamp cursor and
    /// selection to `buffer_size`.
    pub fn sync(&mut self, region: LayoutRegion, group: usize, buffer_size: usize) {
        self.selection.clamp_to(buffer_size);
        self.scroller
            .set_geometry(Geometry::compute(region, buffer_size, group));
    }

    /// Keep the cursor on screen.
    pub fn follow_cursor(&mut self, buffer_size: usize) -> bool {
        self.scroller.scroll_to(self.selection.cursor(), buffer_size)
    }
}

/// Ordered tab list plus the active tab.
#[derive(Debug, Default)]
struct ViewManager {
    views: Vec<View>,
    active: Option<usize>,
    next_id: usize,
}

impl ViewManager {
    fn position(&self, id: ViewId) -> Option<usize> {
        self.views.iter().position(|v| v.id == id)
    }

    fn push(&mut self, document: DocumentId) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.views.push(View::new(id, document));
        self.active = Some(self.views.len() - 1);
        id
    }

    fn remove(&mut self, idx: usize) -> View {
        let view = self.views.remove(idx);
        self.active = match self.active {
            _ if self.views.is_empty() => None,
            Some(a) if a > idx => Some(a - 1),
            Some(a) if a == idx => Some(idx.min(self.views.len() - 1)),
            other => other,
        };
        view
    }
}

/// Disjoint mutable access to one view, its document and the clipboard.
pub struct EditContext<'a> {
    pub document: &'a mut Document,
    pub view: &'a mut View,
    pub clipboard: &'a mut Clipboard,
    pub region: LayoutRegion,
    pub group: usize,
}

impl EditContext<'_> {
    /// Bring the view in line with the document and current layout.
    pub fn sync_view(&mut self) {
        let size = self.document.size();
        self.view.sync(self.region, self.group, size);
    }
}

/// Top-level owner of every document, view and the clipboard.
#[derive(Debug)]
pub struct ApplicationState {
    documents: Vec<Option<Document>>,
    views: ViewManager,
    clipboard: Clipboard,
    region: LayoutRegion,
    group: usize,
    undo_history_max: usize,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationState {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            views: ViewManager::default(),
            clipboard: Clipboard::new(),
            region: LayoutRegion::single(80, 24),
            group: DEFAULT_GROUP,
            undo_history_max: UNDO_HISTORY_MAX,
        }
    }

    pub fn region(&self) -> LayoutRegion {
        self.region
    }

    pub fn group(&self) -> usize {
        self.group
    }

    /// Layout group used for bytes-per-line rounding (0 is treated as 1).
    pub fn set_group(&mut self, group: usize) {
        self.group = group.max(1);
    }

    /// History depth for documents opened from now on.
    pub fn set_undo_history_max(&mut self, max: usize) {
        self.undo_history_max = max;
    }

    /// Record a new viewport size and refresh every view's geometry.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.region = LayoutRegion::single(width, height);
        debug!(target: "model.app", width, height, "resize");
        for view in &mut self.views.views {
            if let Some(Some(doc)) = self.documents.get(view.document.0) {
                view.sync(self.region, self.group, doc.size());
            }
        }
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Find a live document by name.
    pub fn find_document(&self, name: &str) -> Option<DocumentId> {
        self.documents
            .iter()
            .position(|d| d.as_ref().is_some_and(|d| d.name() == name))
            .map(DocumentId)
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(id.0).and_then(Option::as_ref)
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn document_count(&self) -> usize {
        self.documents.iter().filter(|d| d.is_some()).count()
    }

    /// Open `buffer` under `name` in a new view and make it active. When a
    /// document with that name is already open the existing one is reused
    /// (and `buffer` is dropped).
    pub fn open_document(
        &mut self,
        name: impl Into<String>,
        buffer: impl ByteBuffer + 'static,
    ) -> ViewId {
        let name = name.into();
        let doc_id = match self.find_document(&name) {
            Some(id) => {
                debug!(target: "model.app", name = %name, "document_reused");
                id
            }
            None => {
                let undo = UndoEngine::with_history_max(self.undo_history_max);
                let doc = Document::with_undo(name.as_str(), buffer, undo);
                info!(target: "model.app", name = %name, size = doc.size(), "document_opened");
                self.documents.push(Some(doc));
                DocumentId(self.documents.len() - 1)
            }
        };
        let size = self.documents[doc_id.0].as_ref().map_or(0, Document::size);
        self.attach_view(doc_id, size)
    }

    /// Open another view onto an existing document. Returns `None` when the
    /// document is not open.
    pub fn open_view(&mut self, document: DocumentId) -> Option<ViewId> {
        let size = self.document(document)?.size();
        Some(self.attach_view(document, size))
    }

    fn attach_view(&mut self, document: DocumentId, size: usize) -> ViewId {
        let id = self.views.push(document);
        if let Some(view) = self.views.views.last_mut() {
            view.sync(self.region, self.group, size);
        }
        debug!(target: "model.app", view = id.0, document = document.0, "view_opened");
        id
    }

    /// Close a view. Its document is closed too when no other view refers
    /// to it. The nearest remaining view becomes active if this one was.
    /// Returns false for an unknown view.
    pub fn close_view(&mut self, id: ViewId) -> bool {
        let Some(idx) = self.views.position(id) else {
            return false;
        };
        let view = self.views.remove(idx);
        let still_used = self.views.views.iter().any(|v| v.document == view.document);
        if !still_used {
            if let Some(doc) = self.documents.get_mut(view.document.0).and_then(Option::take) {
                info!(target: "model.app", name = doc.name(), dirty = doc.is_dirty(), "document_closed");
            }
        }
        debug!(target: "model.app", view = id.0, "view_closed");
        true
    }

    pub fn views(&self) -> &[View] {
        &self.views.views
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.views.iter().find(|v| v.id == id)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.views.iter_mut().find(|v| v.id == id)
    }

    pub fn active_view_id(&self) -> Option<ViewId> {
        self.views.active.map(|i| self.views.views[i].id)
    }

    pub fn active_view(&self) -> Option<&View> {
        self.views.active.map(|i| &self.views.views[i])
    }

    /// Switch tabs. Returns false for an unknown view.
    pub fn set_active(&mut self, id: ViewId) -> bool {
        match self.views.position(id) {
            Some(idx) => {
                self.views.active = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Mutable access to a view together with its document and the
    /// clipboard. Returns `None` for an unknown view.
    ///
    /// # Panics
    /// If the view refers to a closed document (model corruption).
    pub fn edit_context(&mut self, id: ViewId) -> Option<EditContext<'_>> {
        let view = self.views.views.iter_mut().find(|v| v.id == id)?;
        let doc_id = view.document;
        let Some(Some(document)) = self.documents.get_mut(doc_id.0) else {
            panic!("view {} refers to closed document {}", id.0, doc_id.0);
        };
        Some(EditContext {
            document,
            view,
            clipboard: &mut self.clipboard,
            region: self.region,
            group: self.group,
        })
    }
}
