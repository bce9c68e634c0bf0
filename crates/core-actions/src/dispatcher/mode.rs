//! Mode transitions (Normal <-> Insert / Overwrite), cancel and backspace.
//!
//! Overwrite requested on end-of-data enters Insert instead; there is no
//! byte there to replace.

use super::DispatchResult;
use core_model::EditContext;
use core_state::Mode;

fn changed(ctx: &mut EditContext<'_>, f: impl FnOnce(&mut EditContext<'_>)) -> DispatchResult {
    let before = ctx.view.edit.clone();
    f(ctx);
    DispatchResult::dirty_if(ctx.view.edit != before)
}

pub(crate) fn handle_enter(requested: Mode, ctx: &mut EditContext<'_>) -> DispatchResult {
    let at_end = ctx.view.selection.cursor() >= ctx.document.size();
    changed(ctx, |ctx| {
        ctx.view.edit.enter_mode(requested, at_end);
    })
}

pub(crate) fn handle_cancel(ctx: &mut EditContext<'_>) -> DispatchResult {
    changed(ctx, |ctx| ctx.view.edit.cancel())
}

pub(crate) fn handle_backspace(ctx: &mut EditContext<'_>) -> DispatchResult {
    if ctx.view.edit.mode() == Mode::Normal {
        return DispatchResult::clean();
    }
    changed(ctx, |ctx| ctx.view.edit.backspace())
}
