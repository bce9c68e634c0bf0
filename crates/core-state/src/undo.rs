use crate::selection::ViewSnapshot;
use core_buffer::{BufferError, ByteBuffer, Detached};
use std::collections::VecDeque;
use tracing::trace;

/// Default maximum number of records retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 1000;

/// One reversible buffer mutation.
///
/// Variants carry everything needed to replay in either direction (offsets,
/// byte values, detached range contents) so a record stays valid no matter
/// how the buffer reorganizes its storage afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert { offset: usize, byte: u8 },
    Overwrite { offset: usize, old: u8, new: u8 },
    Cut { offset: usize, content: Detached },
    Paste { offset: usize, content: Detached },
}

impl EditOp {
    pub fn name(&self) -> &'static str {
        match self {
            EditOp::Insert { .. } => "insert",
            EditOp::Overwrite { .. } => "overwrite",
            EditOp::Cut { .. } => "cut",
            EditOp::Paste { .. } => "paste",
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            EditOp::Insert { offset, .. }
            | EditOp::Overwrite { offset, .. }
            | EditOp::Cut { offset, .. }
            | EditOp::Paste { offset, .. } => *offset,
        }
    }

    fn apply_forward(&self, buffer: &mut dyn ByteBuffer) -> Result<(), BufferError> {
        match self {
            EditOp::Insert { offset, byte } => buffer.insert_byte(*offset, *byte),
            EditOp::Overwrite { offset, new, .. } => replace_byte(buffer, *offset, *new),
            EditOp::Cut { offset, content } => buffer.remove_range(*offset, content.len()),
            EditOp::Paste { offset, content } => buffer.paste_at(*offset, content),
        }
    }

    fn apply_inverse(&self, buffer: &mut dyn ByteBuffer) -> Result<(), BufferError> {
        match self {
            EditOp::Insert { offset, .. } => buffer.remove_range(*offset, 1),
            EditOp::Overwrite { offset, old, .. } => replace_byte(buffer, *offset, *old),
            EditOp::Cut { offset, content } => buffer.paste_at(*offset, content),
            EditOp::Paste { offset, content } => buffer.remove_range(*offset, content.len()),
        }
    }
}

fn replace_byte(buffer: &mut dyn ByteBuffer, offset: usize, byte: u8) -> Result<(), BufferError> {
    let old = buffer.read_byte(offset);
    buffer.remove_range(offset, 1)?;
    if let Err(e) = buffer.insert_byte(offset, byte) {
        if let Some(old) = old {
            buffer.insert_byte(offset, old)?;
        }
        return Err(e);
    }
    Ok(())
}

/// An edit plus the view state on either side of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    pub op: EditOp,
    /// Restored after undo.
    pub before: ViewSnapshot,
    /// Restored after redo.
    pub after: ViewSnapshot,
}

/// Linear undo/redo history for one document.
#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: VecDeque<EditRecord>,
    redo_stack: Vec<EditRecord>,
    history_max: usize,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::with_history_max(UNDO_HISTORY_MAX)
    }

    /// `history_max == 0` keeps every record.
    pub fn with_history_max(history_max: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            history_max,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn history_max(&self) -> usize {
        self.history_max
    }
    pub fn last_undo(&self) -> Option<&EditRecord> {
        self.undo_stack.back()
    }

    /// Push a record for a mutation that has already been applied. Any redo
    /// history is discarded (no branching).
    pub fn record(&mut self, entry: EditRecord) {
        trace!(target: "state.undo", op = entry.op.name(), offset = entry.op.offset(), undo_depth = self.undo_stack.len() + 1, "record");
        self.undo_stack.push_back(entry);
        if self.history_max > 0 && self.undo_stack.len() > self.history_max {
            self.undo_stack.pop_front();
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Revert the most recent record. Returns the view state to restore, or
    /// `None` when there is nothing to undo. On buffer failure the record is
    /// left on the undo stack.
    pub fn undo(&mut self, buffer: &mut dyn ByteBuffer) -> Result<Option<ViewSnapshot>, BufferError> {
        let Some(entry) = self.undo_stack.pop_back() else {
            return Ok(None);
        };
        if let Err(e) = entry.op.apply_inverse(buffer) {
            self.undo_stack.push_back(entry);
            return Err(e);
        }
        trace!(target: "state.undo", op = entry.op.name(), undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len() + 1, "undo_pop");
        let restore = entry.before;
        self.redo_stack.push(entry);
        Ok(Some(restore))
    }

    /// Re-apply the most recently undone record.
    pub fn redo(&mut self, buffer: &mut dyn ByteBuffer) -> Result<Option<ViewSnapshot>, BufferError> {
        let Some(entry) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = entry.op.apply_forward(buffer) {
            self.redo_stack.push(entry);
            return Err(e);
        }
        trace!(target: "state.undo", op = entry.op.name(), undo_depth = self.undo_stack.len() + 1, redo_depth = self.redo_stack.len(), "redo_pop");
        let restore = entry.after;
        self.undo_stack.push_back(entry);
        Ok(Some(restore))
    }
}
