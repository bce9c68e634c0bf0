//! Command surface of the editor: the `Action` vocabulary, translation from
//! key/mouse events and script lines, and the dispatcher that applies actions
//! to an `ApplicationState`.
//!
//! Input never touches state directly. Front ends translate events into
//! actions (`KeyTranslator`, `CommandParser`) and hand each action to
//! `dispatcher::dispatch`, which returns a `DispatchResult` telling the
//! caller whether a redraw is needed, or an `EditError` for display.

pub mod command_parser;
pub mod dispatcher;
mod key_translator;

pub use command_parser::{CommandParser, ParsedCommand, parse_number};
pub use dispatcher::{DispatchResult, dispatch, dispatch_to};
pub use key_translator::{ActionBatch, KeyTranslator};

/// Single-step cursor motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    /// One byte back.
    Left,
    /// One byte forward.
    Right,
    /// One line (bytes-per-line) back.
    Up,
    /// One line forward.
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the cursor, clearing the selection.
    Motion(MotionKind),
    /// Move the cursor and extend the selection toward it.
    ExtendMotion(MotionKind),
    /// Move the cursor to an absolute address (clamped), clearing the selection.
    MoveTo(usize),
    /// Extend the selection toward an address from its nearer edge.
    ExtendSelection(usize),
    /// Anchor a mouse drag.
    BeginDrag(usize),
    /// Pointer moved while dragging.
    DragTo(usize),
    EndDrag,
    /// Select the byte under the cursor when nothing is selected.
    SelectUnderCursor,
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
    EnterInsertMode,
    EnterOverwriteMode,
    FeedHexDigit(char),
    CancelInput,
    Backspace,
    /// Viewport resized to (columns, rows).
    Resize(u16, u16),
}
