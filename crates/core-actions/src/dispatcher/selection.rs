//! Selection sub-dispatch: discrete extend, mouse drag, select-under-cursor.

use super::DispatchResult;
use core_model::EditContext;
use tracing::trace;

fn changed(ctx: &mut EditContext<'_>, f: impl FnOnce(&mut EditContext<'_>)) -> DispatchResult {
    let before = ctx.view.selection.clone();
    f(ctx);
    DispatchResult::dirty_if(ctx.view.selection != before)
}

pub(crate) fn handle_extend(addr: usize, ctx: &mut EditContext<'_>) -> DispatchResult {
    changed(ctx, |ctx| {
        let len = ctx.document.size();
        ctx.view.selection.extend_selection(addr, len);
    })
}

pub(crate) fn handle_begin_drag(addr: usize, ctx: &mut EditContext<'_>) -> DispatchResult {
    changed(ctx, |ctx| {
        let len = ctx.document.size();
        ctx.view.selection.begin_drag(addr, len);
    })
}

pub(crate) fn handle_drag_to(addr: usize, ctx: &mut EditContext<'_>) -> DispatchResult {
    changed(ctx, |ctx| {
        let len = ctx.document.size();
        ctx.view.selection.drag_to(addr, len);
    })
}

pub(crate) fn handle_end_drag(ctx: &mut EditContext<'_>) -> DispatchResult {
    changed(ctx, |ctx| ctx.view.selection.end_drag())
}

pub(crate) fn handle_select_under_cursor(ctx: &mut EditContext<'_>) -> DispatchResult {
    changed(ctx, |ctx| {
        let len = ctx.document.size();
        if !ctx.view.selection.select_under_cursor(len) {
            trace!(target: "actions.dispatch", cursor = ctx.view.selection.cursor(), "nothing_under_cursor");
        }
    })
}
