//! Undo / Redo.
//!
//! History is per document; the issuing view gets the cursor and selection
//! recorded with the edit.

use super::DispatchResult;
use core_model::EditContext;
use core_state::EditError;
use tracing::trace;

pub(crate) fn handle_undo(ctx: &mut EditContext<'_>) -> Result<DispatchResult, EditError> {
    let undone = ctx.document.undo(&mut ctx.view.selection)?;
    trace!(target: "actions.dispatch", op = "undo", applied = undone, "undo");
    Ok(if undone {
        DispatchResult::buffer_changed()
    } else {
        DispatchResult::clean()
    })
}

pub(crate) fn handle_redo(ctx: &mut EditContext<'_>) -> Result<DispatchResult, EditError> {
    let redone = ctx.document.redo(&mut ctx.view.selection)?;
    trace!(target: "actions.dispatch", op = "redo", applied = redone, "redo");
    Ok(if redone {
        DispatchResult::buffer_changed()
    } else {
        DispatchResult::clean()
    })
}

#[cfg(test)]
mod tests {
    use crate::{Action, dispatch};
    use core_buffer::VecBuffer;
    use core_model::ApplicationState;

    #[test]
    fn undo_and_redo_report_changes_only_when_applied() {
        let mut app = ApplicationState::new();
        app.open_document("u", VecBuffer::from_bytes(b"ABCD".to_vec()));
        assert!(!dispatch(Action::Undo, &mut app).unwrap().buffer_changed);
        for a in [Action::MoveTo(1), Action::ExtendSelection(2), Action::Cut] {
            dispatch(a, &mut app).unwrap();
        }
        assert!(dispatch(Action::Undo, &mut app).unwrap().buffer_changed);
        let v = app.active_view().unwrap();
        assert_eq!(v.selection.cursor(), 2);
        assert_eq!(v.selection.selection(), (1, 2));
        assert!(dispatch(Action::Redo, &mut app).unwrap().buffer_changed);
        assert!(!dispatch(Action::Redo, &mut app).unwrap().buffer_changed);
        let doc = app.document(app.active_view().unwrap().document).unwrap();
        assert_eq!(doc.buffer().read_range(0, doc.size()), b"AD");
    }
}
