//! An open byte document: buffer, dirty flag, undo history.

use crate::error::EditError;
use crate::selection::{CursorSelection, ViewSnapshot};
use crate::undo::{EditOp, EditRecord, UndoEngine};
use core_buffer::ByteBuffer;
use std::fmt;
use tracing::debug;

pub struct Document {
    name: String,
    buffer: Box<dyn ByteBuffer>,
    dirty: bool,
    undo: UndoEngine,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("size", &self.buffer.size())
            .field("dirty", &self.dirty)
            .field("undo_depth", &self.undo.undo_depth())
            .field("redo_depth", &self.undo.redo_depth())
            .finish()
    }
}

impl Document {
    pub fn new(name: impl Into<String>, buffer: impl ByteBuffer + 'static) -> Self {
        Self::with_undo(name, buffer, UndoEngine::new())
    }

    pub fn with_undo(
        name: impl Into<String>,
        buffer: impl ByteBuffer + 'static,
        undo: UndoEngine,
    ) -> Self {
        Self {
            name: name.into(),
            buffer: Box::new(buffer),
            dirty: false,
            undo,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current buffer size `N`; also the end-of-data address.
    pub fn size(&self) -> usize {
        self.buffer.size()
    }

    pub fn buffer(&self) -> &dyn ByteBuffer {
        self.buffer.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the persistence layer once contents are saved.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn undo_engine(&self) -> &UndoEngine {
        &self.undo
    }

    /// Insert `byte` before the cursor and advance past it.
    pub fn insert_byte(&mut self, view: &mut CursorSelection, byte: u8) -> Result<(), EditError> {
        let offset = view.cursor();
        let before = view.snapshot();
        self.buffer.insert_byte(offset, byte)?;
        view.move_to(offset + 1, self.size());
        self.commit(EditOp::Insert { offset, byte }, before, view);
        Ok(())
    }

    /// Replace the byte under the cursor and advance past it.
    pub fn overwrite_byte(&mut self, view: &mut CursorSelection, byte: u8) -> Result<(), EditError> {
        let offset = view.cursor();
        let size = self.size();
        let Some(old) = self.buffer.read_byte(offset) else {
            return Err(EditError::RangeOutOfBounds {
                offset,
                size: 1,
                len: size,
            });
        };
        let before = view.snapshot();
        self.buffer.remove_range(offset, 1)?;
        if let Err(e) = self.buffer.insert_byte(offset, byte) {
            // Put the original back so a failed write leaves no trace.
            self.buffer.insert_byte(offset, old)?;
            return Err(e.into());
        }
        view.move_to(offset + 1, self.size());
        self.commit(EditOp::Overwrite { offset, old, new: byte }, before, view);
        Ok(())
    }

    /// Revert the newest edit and restore `view` to its pre-edit state.
    /// Returns false when there was nothing to undo.
    pub fn undo(&mut self, view: &mut CursorSelection) -> Result<bool, EditError> {
        match self.undo.undo(self.buffer.as_mut())? {
            Some(snap) => {
                view.restore(snap);
                self.dirty = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn redo(&mut self, view: &mut CursorSelection) -> Result<bool, EditError> {
        match self.undo.redo(self.buffer.as_mut())? {
            Some(snap) => {
                view.restore(snap);
                self.dirty = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut dyn ByteBuffer {
        self.buffer.as_mut()
    }

    /// Record an already-applied mutation; `view` holds the post-edit state.
    pub(crate) fn commit(
        &mut self,
        op: EditOp,
        before: ViewSnapshot,
        view: &CursorSelection,
    ) {
        if !self.dirty {
            debug!(target: "state.document", name = %self.name, "dirty");
        }
        self.dirty = true;
        self.undo.record(EditRecord {
            op,
            before,
            after: view.snapshot(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_buffer::VecBuffer;

    fn doc(bytes: &[u8]) -> Document {
        Document::new("test", VecBuffer::from_bytes(bytes.to_vec()))
    }

    fn bytes(d: &Document) -> Vec<u8> {
        d.buffer().read_range(0, d.size())
    }

    #[test]
    fn insert_advances_cursor_and_records() {
        let mut d = doc(b"AB");
        let mut v = CursorSelection::new();
        v.move_to(1, 2);
        d.insert_byte(&mut v, 0x41).unwrap();
        assert_eq!(bytes(&d), b"AAB");
        assert_eq!(v.cursor(), 2);
        assert!(d.is_dirty());
        assert_eq!(d.undo_engine().undo_depth(), 1);
    }

    #[test]
    fn overwrite_reads_old_byte_first() {
        let mut d = doc(b"ABC");
        let mut v = CursorSelection::new();
        v.move_to(1, 3);
        d.overwrite_byte(&mut v, 0x42).unwrap();
        d.overwrite_byte(&mut v, 0x5a).unwrap();
        assert_eq!(bytes(&d), b"ABZ");
        assert_eq!(v.cursor(), 3);

        assert!(d.undo(&mut v).unwrap());
        assert_eq!(bytes(&d), b"ABC");
        assert_eq!(v.cursor(), 2);
        assert!(d.undo(&mut v).unwrap());
        assert_eq!(v.cursor(), 1);
        assert!(!d.undo(&mut v).unwrap());
    }

    #[test]
    fn overwrite_at_end_of_data_is_rejected() {
        let mut d = doc(b"AB");
        let mut v = CursorSelection::new();
        v.move_to(2, 2);
        assert_eq!(
            d.overwrite_byte(&mut v, 1),
            Err(EditError::RangeOutOfBounds {
                offset: 2,
                size: 1,
                len: 2
            })
        );
        assert!(!d.is_dirty());
        assert_eq!(d.undo_engine().undo_depth(), 0);
    }

    #[test]
    fn undo_and_redo_mark_dirty() {
        let mut d = doc(b"");
        let mut v = CursorSelection::new();
        d.insert_byte(&mut v, 7).unwrap();
        d.mark_clean();
        d.undo(&mut v).unwrap();
        assert!(d.is_dirty());
        d.mark_clean();
        d.redo(&mut v).unwrap();
        assert!(d.is_dirty());
        assert_eq!(bytes(&d), vec![7u8]);
        assert_eq!(v.cursor(), 1);
    }
}
