//! Single-slot clipboard and the cut / copy / paste operations.
//!
//! Range validation happens before anything is touched: a rejected request
//! leaves the buffer, the undo history and the clipboard slot untouched.

use crate::document::Document;
use crate::error::EditError;
use crate::selection::CursorSelection;
use crate::undo::EditOp;
use core_buffer::Detached;
use tracing::trace;

/// Process-wide holder of the last cut or copied range.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Option<Detached>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&Detached> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.as_ref().is_none_or(Detached::is_empty)
    }

    pub fn set(&mut self, content: Detached) {
        trace!(target: "state.clipboard", len = content.len(), "set");
        self.slot = Some(content);
    }
}

fn selected_range(doc: &Document, view: &CursorSelection) -> Result<(usize, usize), EditError> {
    let (offset, size) = view.selection();
    if size == 0 {
        return Err(EditError::InvalidRange);
    }
    let len = doc.size();
    match offset.checked_add(size) {
        Some(end) if end <= len => Ok((offset, size)),
        _ => Err(EditError::RangeOutOfBounds { offset, size, len }),
    }
}

/// Remove the selected range into the clipboard. The cursor lands on the
/// start of the removed range with nothing selected.
pub fn cut(
    doc: &mut Document,
    view: &mut CursorSelection,
    clipboard: &mut Clipboard,
) -> Result<(), EditError> {
    let (offset, size) = selected_range(doc, view)?;
    let before = view.snapshot();
    let content = doc.buffer_mut().cut_range(offset, size)?;
    clipboard.set(content.clone());
    view.move_to(offset, doc.size());
    trace!(target: "state.clipboard", offset, size, "cut");
    doc.commit(EditOp::Cut { offset, content }, before, view);
    Ok(())
}

/// Snapshot the selected range into the clipboard. The buffer is untouched;
/// the selection collapses to its start where the cursor now rests.
pub fn copy(
    doc: &Document,
    view: &mut CursorSelection,
    clipboard: &mut Clipboard,
) -> Result<(), EditError> {
    let (offset, size) = selected_range(doc, view)?;
    let content = doc.buffer().copy_range(offset, size)?;
    clipboard.set(content);
    view.move_to(offset, doc.size());
    trace!(target: "state.clipboard", offset, size, "copy");
    Ok(())
}

/// Insert the clipboard contents at the cursor and select them. Returns
/// false (and changes nothing) when the clipboard is empty.
pub fn paste(
    doc: &mut Document,
    view: &mut CursorSelection,
    clipboard: &Clipboard,
) -> Result<bool, EditError> {
    let Some(content) = clipboard.contents().filter(|c| !c.is_empty()) else {
        trace!(target: "state.clipboard", "paste_empty_clipboard");
        return Ok(false);
    };
    let offset = view.cursor();
    let before = view.snapshot();
    doc.buffer_mut().paste_at(offset, content)?;
    view.set_selection(offset, content.len(), doc.size());
    trace!(target: "state.clipboard", offset, len = content.len(), "paste");
    doc.commit(
        EditOp::Paste {
            offset,
            content: content.clone(),
        },
        before,
        view,
    );
    Ok(true)
}
