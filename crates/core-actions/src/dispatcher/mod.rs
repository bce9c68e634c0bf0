//! Dispatcher applying `Action` to an `ApplicationState`.
//!
//! Sub-modules:
//! * `motion`    - single-step and absolute cursor movement
//! * `selection` - discrete extend, mouse drag, select-under-cursor
//! * `mode`      - Normal / Insert / Overwrite transitions, cancel, backspace
//! * `edit`      - hex nibble entry and byte commits
//! * `clipboard` - cut / copy / paste
//! * `undo`      - undo / redo
//!
//! Every action runs against one view. Before the handler runs, the view is
//! re-synced with its document (another view on the same document may have
//! changed its size) and with the current layout; afterwards the viewport
//! follows the cursor. A half-typed byte only survives actions that feed or
//! retract nibbles (and resizes); anything else drops it first.
//!
//! Range errors (`EditError`) are returned to the caller after the handler
//! has already refused to touch the buffer, undo history or clipboard.

use crate::Action;
use core_model::{ApplicationState, EditContext, ViewId};
use core_state::EditError;
use tracing::trace;

mod clipboard;
mod edit;
mod mode;
mod motion;
mod selection;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Something visible changed; redraw.
    pub dirty: bool,
    /// Buffer bytes changed (edit, cut, paste, undo, redo).
    pub buffer_changed: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            buffer_changed: false,
        }
    }
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn buffer_changed() -> Self {
        Self {
            dirty: true,
            buffer_changed: true,
        }
    }
    fn dirty_if(changed: bool) -> Self {
        if changed { Self::dirty() } else { Self::clean() }
    }
}

/// Apply an action to the active view. With no open view only `Resize` has
/// any effect.
pub fn dispatch(action: Action, app: &mut ApplicationState) -> Result<DispatchResult, EditError> {
    match app.active_view_id() {
        Some(id) => dispatch_to(id, action, app),
        None => {
            if let Action::Resize(w, h) = action {
                app.resize(w, h);
                return Ok(DispatchResult::dirty());
            }
            Ok(DispatchResult::clean())
        }
    }
}

/// Apply an action to a specific view. Unknown views are ignored.
pub fn dispatch_to(
    id: ViewId,
    action: Action,
    app: &mut ApplicationState,
) -> Result<DispatchResult, EditError> {
    let mut result = DispatchResult::clean();
    if let Action::Resize(w, h) = action {
        app.resize(w, h);
        result = DispatchResult::dirty();
    }
    let Some(mut ctx) = app.edit_context(id) else {
        return Ok(result);
    };
    ctx.sync_view();
    trace!(target: "actions.dispatch", view = id.0, ?action, mode = ctx.view.edit.mode().as_str(), "dispatch");
    if drops_pending_input(&action) && ctx.view.edit.input().entered() > 0 {
        ctx.view.edit.reset_input();
        trace!(target: "actions.dispatch", view = id.0, "pending_nibble_dropped");
        result = DispatchResult::dirty();
    }

    let handled = handle(action, &mut ctx)?;
    result.dirty |= handled.dirty;
    result.buffer_changed |= handled.buffer_changed;

    if result.buffer_changed {
        // Address column width may change with the size.
        ctx.sync_view();
    }
    if ctx.view.follow_cursor(ctx.document.size()) {
        result.dirty = true;
    }
    Ok(result)
}

fn drops_pending_input(action: &Action) -> bool {
    !matches!(
        action,
        Action::FeedHexDigit(_) | Action::Backspace | Action::Resize(..)
    )
}

fn handle(action: Action, ctx: &mut EditContext<'_>) -> Result<DispatchResult, EditError> {
    Ok(match action {
        Action::Motion(kind) => motion::handle_motion(kind, ctx),
        Action::ExtendMotion(kind) => motion::handle_extend_motion(kind, ctx),
        Action::MoveTo(addr) => motion::handle_move_to(addr, ctx),
        Action::ExtendSelection(addr) => selection::handle_extend(addr, ctx),
        Action::BeginDrag(addr) => selection::handle_begin_drag(addr, ctx),
        Action::DragTo(addr) => selection::handle_drag_to(addr, ctx),
        Action::EndDrag => selection::handle_end_drag(ctx),
        Action::SelectUnderCursor => selection::handle_select_under_cursor(ctx),
        Action::Cut => clipboard::handle_cut(ctx)?,
        Action::Copy => clipboard::handle_copy(ctx)?,
        Action::Paste => clipboard::handle_paste(ctx)?,
        Action::Undo => undo::handle_undo(ctx)?,
        Action::Redo => undo::handle_redo(ctx)?,
        Action::EnterInsertMode => mode::handle_enter(core_state::Mode::Insert, ctx),
        Action::EnterOverwriteMode => mode::handle_enter(core_state::Mode::Overwrite, ctx),
        Action::CancelInput => mode::handle_cancel(ctx),
        Action::Backspace => mode::handle_backspace(ctx),
        Action::FeedHexDigit(c) => edit::handle_hex_digit(c, ctx)?,
        // Geometry already refreshed by `dispatch_to`.
        Action::Resize(..) => DispatchResult::dirty(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MotionKind;
    use core_buffer::VecBuffer;
    use core_state::Mode;

    fn app_with(bytes: &[u8]) -> (ApplicationState, ViewId) {
        let mut app = ApplicationState::new();
        let id = app.open_document("t.bin", VecBuffer::from_bytes(bytes.to_vec()));
        (app, id)
    }

    fn bytes(app: &ApplicationState, id: ViewId) -> Vec<u8> {
        let doc = app.document(app.view(id).unwrap().document).unwrap();
        doc.buffer().read_range(0, doc.size())
    }

    fn run(app: &mut ApplicationState, actions: &[Action]) {
        for a in actions {
            dispatch(*a, app).unwrap();
        }
    }

    #[test]
    fn motion_is_dirty_only_when_cursor_moves() {
        let (mut app, _) = app_with(b"AB");
        let r = dispatch(Action::Motion(MotionKind::Left), &mut app).unwrap();
        assert_eq!(r, DispatchResult::clean());
        let r = dispatch(Action::Motion(MotionKind::Right), &mut app).unwrap();
        assert!(r.dirty);
        assert!(!r.buffer_changed);
    }

    #[test]
    fn hex_entry_reports_buffer_change_on_second_nibble() {
        let (mut app, id) = app_with(b"");
        dispatch(Action::EnterInsertMode, &mut app).unwrap();
        let r = dispatch(Action::FeedHexDigit('4'), &mut app).unwrap();
        assert!(!r.buffer_changed);
        let r = dispatch(Action::FeedHexDigit('1'), &mut app).unwrap();
        assert!(r.buffer_changed);
        assert_eq!(bytes(&app, id), b"A");
        assert_eq!(app.view(id).unwrap().selection.cursor(), 1);
    }

    #[test]
    fn invalid_cut_surfaces_error_without_change() {
        let (mut app, id) = app_with(b"ABCD");
        assert_eq!(dispatch(Action::Cut, &mut app), Err(EditError::InvalidRange));
        assert_eq!(bytes(&app, id), b"ABCD");
        assert!(app.clipboard().is_empty());
    }

    #[test]
    fn dispatch_without_views_is_clean() {
        let mut app = ApplicationState::new();
        assert_eq!(
            dispatch(Action::Paste, &mut app).unwrap(),
            DispatchResult::clean()
        );
        assert!(dispatch(Action::Resize(100, 10), &mut app).unwrap().dirty);
        assert_eq!(app.region().width, 100);
    }

    fn pending(app: &ApplicationState) -> u8 {
        app.active_view().unwrap().edit.input().entered()
    }

    #[test]
    fn undo_drops_half_typed_byte() {
        let (mut app, id) = app_with(b"");
        run(
            &mut app,
            &[
                Action::EnterInsertMode,
                Action::FeedHexDigit('4'),
                Action::FeedHexDigit('1'),
                Action::FeedHexDigit('4'),
            ],
        );
        assert_eq!(pending(&app), 1);
        assert!(dispatch(Action::Undo, &mut app).unwrap().buffer_changed);
        assert_eq!(bytes(&app, id), b"");
        assert_eq!(pending(&app), 0);
        // The next digit starts a fresh byte instead of completing 0x42.
        run(&mut app, &[Action::FeedHexDigit('2')]);
        assert_eq!(bytes(&app, id), b"");
        assert_eq!(pending(&app), 1);
    }

    #[test]
    fn paste_drops_half_typed_byte() {
        let (mut app, id) = app_with(b"XYZ");
        run(
            &mut app,
            &[
                Action::MoveTo(0),
                Action::SelectUnderCursor,
                Action::Copy,
                Action::MoveTo(2),
                Action::EnterInsertMode,
                Action::FeedHexDigit('4'),
                Action::Paste,
            ],
        );
        assert_eq!(bytes(&app, id), b"XYXZ");
        assert_eq!(pending(&app), 0);
        assert_eq!(app.view(id).unwrap().selection.selection(), (2, 1));
        run(&mut app, &[Action::FeedHexDigit('1')]);
        assert_eq!(bytes(&app, id), b"XYXZ");
    }

    #[test]
    fn selection_actions_drop_half_typed_byte() {
        for action in [
            Action::ExtendSelection(0),
            Action::BeginDrag(1),
            Action::DragTo(0),
            Action::Cut,
            Action::Redo,
        ] {
            let (mut app, _) = app_with(b"ABCD");
            run(
                &mut app,
                &[
                    Action::MoveTo(2),
                    Action::EnterOverwriteMode,
                    Action::FeedHexDigit('f'),
                ],
            );
            let _ = dispatch(action, &mut app);
            assert_eq!(pending(&app), 0, "{action:?}");
        }
    }

    #[test]
    fn backspace_and_resize_keep_half_typed_byte() {
        let (mut app, _) = app_with(b"AB");
        run(
            &mut app,
            &[
                Action::EnterInsertMode,
                Action::FeedHexDigit('1'),
                Action::Resize(40, 5),
            ],
        );
        assert_eq!(pending(&app), 1);
        run(&mut app, &[Action::Backspace]);
        assert_eq!(pending(&app), 0);
        assert_eq!(app.active_view().unwrap().edit.mode(), Mode::Insert);
    }

    #[test]
    fn viewport_follows_cursor() {
        let (mut app, id) = app_with(&[0u8; 256]);
        // 80 cols, 3 digit addresses -> 16 bytes per line; 4 rows visible.
        dispatch(Action::Resize(80, 4), &mut app).unwrap();
        run(&mut app, &[Action::MoveTo(100)]);
        let v = app.view(id).unwrap();
        assert_eq!(v.scroller.geometry().bytes_per_line, 16);
        // line 6 must be the last visible line -> first line 3.
        assert_eq!(v.scroller.top(), 48);
        run(&mut app, &[Action::MoveTo(0)]);
        assert_eq!(app.view(id).unwrap().scroller.top(), 0);
    }

    #[test]
    fn other_view_is_clamped_before_acting() {
        let (mut app, a) = app_with(b"ABCDEFGH");
        let doc = app.view(a).unwrap().document;
        let b = app.open_view(doc).unwrap();
        // View b selects the tail, view a then cuts most of the buffer.
        dispatch_to(b, Action::MoveTo(8), &mut app).unwrap();
        dispatch_to(b, Action::ExtendSelection(5), &mut app).unwrap();
        dispatch_to(a, Action::MoveTo(0), &mut app).unwrap();
        dispatch_to(a, Action::ExtendSelection(5), &mut app).unwrap();
        dispatch_to(a, Action::Cut, &mut app).unwrap();
        assert_eq!(bytes(&app, a), b"GH");
        // b's stale selection is clamped, cursor back inside the buffer.
        dispatch_to(b, Action::Motion(MotionKind::Right), &mut app).unwrap();
        let v = app.view(b).unwrap();
        assert!(v.selection.cursor() <= 2);
        assert!(!v.selection.in_selection(2));
        assert_eq!(v.edit.mode(), Mode::Normal);
    }
}
