//! Cursor / selection / drag-anchor model owned by each view.
//!
//! Addresses live in `0..=len` where `len` is the current buffer size. The
//! cursor may rest on `len` (the append position) but the half-open selection
//! `[start, start+size)` never contains it. Every operation that can grow the
//! selection re-checks this and chomps the end-of-data byte; if the sentinel
//! is still inside afterwards the model is corrupt and we panic rather than
//! let a bad range reach cut/copy or the undo history.
//!
//! Two extension contexts exist:
//! * Drag (`dragging == true`): the selection is the inclusive span between
//!   the drag anchor and the pointer address.
//! * Discrete extend (shift-click, shift-arrow): with no selection, the
//!   inclusive span between cursor and target; with a selection, the edge
//!   nearer to the target moves to include it.

use tracing::trace;

/// Cursor + selection captured for undo/redo restoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSnapshot {
    pub cursor: usize,
    pub selection_start: usize,
    pub selection_size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorSelection {
    cursor: usize,
    selection_start: usize,
    selection_size: usize,
    dragging: bool,
    drag_anchor: usize,
}

/// Inclusive span between two addresses as `(start, size)`.
fn inclusive_span(a: usize, b: usize) -> (usize, usize) {
    if b < a { (b, a - b + 1) } else { (a, b - a + 1) }
}

impl CursorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current selection as `(start, size)`.
    pub fn selection(&self) -> (usize, usize) {
        (self.selection_start, self.selection_size)
    }

    pub fn has_selection(&self) -> bool {
        self.selection_size > 0
    }

    pub fn in_selection(&self, addr: usize) -> bool {
        addr >= self.selection_start && addr - self.selection_start < self.selection_size
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_anchor(&self) -> usize {
        self.drag_anchor
    }

    /// Move the cursor (clamped to `[0, len]`) and clear the selection.
    pub fn move_to(&mut self, addr: usize, len: usize) {
        self.cursor = addr.min(len);
        self.clear_selection();
    }

    /// Collapse the selection to an empty range at the cursor.
    pub fn clear_selection(&mut self) {
        self.selection_start = self.cursor;
        self.selection_size = 0;
    }

    /// Replace the selection with an explicit range. The range must end at or
    /// before `len`.
    pub fn set_selection(&mut self, start: usize, size: usize, len: usize) {
        assert!(
            start.checked_add(size).is_some_and(|end| end <= len),
            "selection {start}+{size} exceeds buffer of {len} bytes"
        );
        self.selection_start = start;
        self.selection_size = size;
    }

    /// Select the byte under the cursor when nothing is selected. Returns
    /// false when the cursor sits on end-of-data (nothing to select).
    pub fn select_under_cursor(&mut self, len: usize) -> bool {
        if self.selection_size > 0 {
            return true;
        }
        if self.cursor >= len {
            return false;
        }
        self.selection_start = self.cursor;
        self.selection_size = 1;
        true
    }

    /// Grow or shrink the selection toward `addr` and move the cursor there.
    pub fn extend_selection(&mut self, addr: usize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            self.selection_start = 0;
            self.selection_size = 0;
            return;
        }
        let addr = addr.min(len);
        let (start, size) = if self.dragging {
            inclusive_span(self.drag_anchor.min(len), addr)
        } else if self.selection_size == 0 {
            inclusive_span(self.cursor.min(len), addr)
        } else {
            let off = self.selection_start;
            let end = off + self.selection_size;
            if addr < off || (addr < end && addr - off < end - addr) {
                (addr, end - addr)
            } else {
                (off, addr - off + 1)
            }
        };
        self.selection_start = start;
        self.selection_size = size;
        self.cursor = addr;
        self.chomp_end_of_data(len);
    }

    /// Start a mouse drag anchored at `addr`.
    pub fn begin_drag(&mut self, addr: usize, len: usize) {
        let addr = addr.min(len);
        self.dragging = true;
        self.drag_anchor = addr;
        self.cursor = addr;
        self.selection_start = addr;
        self.selection_size = 0;
        trace!(target: "state.selection", anchor = addr, "drag_begin");
    }

    /// Update an in-progress drag. Without a drag this is a plain extend.
    pub fn drag_to(&mut self, addr: usize, len: usize) {
        self.extend_selection(addr, len);
    }

    pub fn end_drag(&mut self) {
        if self.dragging {
            trace!(target: "state.selection", start = self.selection_start, size = self.selection_size, "drag_end");
        }
        self.dragging = false;
    }

    /// Re-establish invariants after the buffer shrank underneath this view
    /// (e.g. another view on the same document cut a range).
    pub fn clamp_to(&mut self, len: usize) {
        self.cursor = self.cursor.min(len);
        self.drag_anchor = self.drag_anchor.min(len);
        if self.selection_start > len {
            self.selection_start = len;
            self.selection_size = 0;
        } else if self.selection_start + self.selection_size > len {
            self.selection_size = len - self.selection_start;
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            cursor: self.cursor,
            selection_start: self.selection_start,
            selection_size: self.selection_size,
        }
    }

    /// Restore cursor/selection from an undo snapshot; any drag is dropped.
    pub fn restore(&mut self, snap: ViewSnapshot) {
        self.cursor = snap.cursor;
        self.selection_start = snap.selection_start;
        self.selection_size = snap.selection_size;
        self.dragging = false;
    }

    fn chomp_end_of_data(&mut self, len: usize) {
        if self.in_selection(len) {
            self.selection_size -= 1;
            if self.cursor >= len {
                self.cursor = len - 1;
            }
            trace!(target: "state.selection", len, start = self.selection_start, size = self.selection_size, "eof_chomped");
        }
        assert!(
            !self.in_selection(len),
            "end-of-data address {len} inside selection {}+{}",
            self.selection_start,
            self.selection_size
        );
    }
}
