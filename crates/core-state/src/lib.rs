//! Edit-state core: per-view cursor/selection and edit mode, per-document
//! buffer ownership and undo history, and the shared clipboard.
//!
//! Ownership:
//! * [`Document`] owns its buffer and its [`UndoEngine`].
//! * Each view owns a [`CursorSelection`] and an [`EditModeController`]; the
//!   view layer passes them into document operations explicitly.
//! * [`Clipboard`] is owned by the application and passed to cut/copy/paste.
//!
//! Every buffer mutation goes through `Document` (byte edits) or the
//! [`clipboard`] functions (range edits), which pair the mutation with an
//! [`undo::EditRecord`] so the history is always in step with the bytes.
//!
//! Telemetry: undo lifecycle under `state.undo`, clipboard traffic under
//! `state.clipboard`, drag/chomp events under `state.selection`, mode
//! transitions under `state.mode`.

pub mod clipboard;
mod document;
mod error;
mod mode;
mod selection;
pub mod undo;

pub use clipboard::Clipboard;
pub use document::Document;
pub use error::EditError;
pub use mode::{EditModeController, Mode, NibbleInput, NibbleOutcome};
pub use selection::{CursorSelection, ViewSnapshot};
pub use undo::{UNDO_HISTORY_MAX, UndoEngine};
