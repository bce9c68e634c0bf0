//! Hex nibble entry and byte commits.
//!
//! A digit only reaches the buffer once it completes a byte. Insert puts the
//! byte before the cursor; Overwrite replaces the byte under it, degrading to
//! Insert when the cursor has reached end-of-data.

use super::DispatchResult;
use core_model::EditContext;
use core_state::{EditError, Mode, NibbleOutcome};
use tracing::trace;

pub(crate) fn handle_hex_digit(
    digit: char,
    ctx: &mut EditContext<'_>,
) -> Result<DispatchResult, EditError> {
    let byte = match ctx.view.edit.feed_nibble(digit) {
        NibbleOutcome::Ignored => return Ok(DispatchResult::clean()),
        NibbleOutcome::Pending => return Ok(DispatchResult::dirty()),
        NibbleOutcome::Complete(byte) => byte,
    };
    let cursor = ctx.view.selection.cursor();
    if ctx.view.edit.mode() == Mode::Overwrite && cursor >= ctx.document.size() {
        ctx.view.edit.degrade_to_insert();
    }
    match ctx.view.edit.mode() {
        Mode::Overwrite => ctx.document.overwrite_byte(&mut ctx.view.selection, byte)?,
        _ => ctx.document.insert_byte(&mut ctx.view.selection, byte)?,
    }
    trace!(target: "actions.dispatch", op = ctx.view.edit.mode().as_str(), offset = cursor, byte, "commit_byte");
    Ok(DispatchResult::buffer_changed())
}

#[cfg(test)]
mod tests {
    use crate::{Action, dispatch};
    use core_buffer::VecBuffer;
    use core_model::ApplicationState;
    use core_state::Mode;

    fn app(bytes: &[u8]) -> ApplicationState {
        let mut app = ApplicationState::new();
        app.open_document("e", VecBuffer::from_bytes(bytes.to_vec()));
        app
    }

    fn run(app: &mut ApplicationState, actions: &[Action]) {
        for a in actions {
            dispatch(*a, app).unwrap();
        }
    }

    fn bytes(app: &ApplicationState) -> Vec<u8> {
        let doc = app.document(app.active_view().unwrap().document).unwrap();
        doc.buffer().read_range(0, doc.size())
    }

    #[test]
    fn insert_mode_inserts_before_cursor() {
        let mut app = app(b"AC");
        run(
            &mut app,
            &[
                Action::MoveTo(1),
                Action::EnterInsertMode,
                Action::FeedHexDigit('4'),
                Action::FeedHexDigit('2'),
            ],
        );
        assert_eq!(bytes(&app), b"ABC");
        let v = app.active_view().unwrap();
        assert_eq!(v.selection.cursor(), 2);
        assert_eq!(v.edit.mode(), Mode::Insert);
    }

    #[test]
    fn overwrite_replaces_and_degrades_at_end() {
        let mut app = app(b"AB");
        run(
            &mut app,
            &[
                Action::MoveTo(1),
                Action::EnterOverwriteMode,
                Action::FeedHexDigit('5'),
                Action::FeedHexDigit('a'),
            ],
        );
        assert_eq!(bytes(&app), b"AZ");
        assert_eq!(app.active_view().unwrap().edit.mode(), Mode::Overwrite);
        // Cursor now on end-of-data: the next byte is appended.
        run(&mut app, &[Action::FeedHexDigit('2'), Action::FeedHexDigit('1')]);
        assert_eq!(bytes(&app), b"AZ!");
        assert_eq!(app.active_view().unwrap().edit.mode(), Mode::Insert);
    }

    #[test]
    fn non_hex_and_normal_mode_digits_are_ignored() {
        let mut app = app(b"AB");
        let r = dispatch(Action::FeedHexDigit('4'), &mut app).unwrap();
        assert!(!r.dirty);
        run(&mut app, &[Action::EnterInsertMode]);
        let r = dispatch(Action::FeedHexDigit('g'), &mut app).unwrap();
        assert!(!r.dirty);
        assert_eq!(bytes(&app), b"AB");
    }

    #[test]
    fn each_committed_byte_is_one_undo_step() {
        let mut app = app(b"");
        run(
            &mut app,
            &[
                Action::EnterInsertMode,
                Action::FeedHexDigit('4'),
                Action::FeedHexDigit('1'),
                Action::FeedHexDigit('4'),
                Action::FeedHexDigit('2'),
                Action::CancelInput,
                Action::Undo,
            ],
        );
        assert_eq!(bytes(&app), b"A");
        assert_eq!(app.active_view().unwrap().selection.cursor(), 1);
    }
}
