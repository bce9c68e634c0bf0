//! Motion sub-dispatch (cursor movement).
//!
//! Left/Right step one byte, Up/Down step one line of the view's current
//! geometry. Targets clamp to `[0, len]`. Plain motion clears the selection;
//! extend motion grows it toward the target. `dispatch_to` has already
//! dropped any half-typed byte.

use super::DispatchResult;
use crate::MotionKind;
use core_model::EditContext;

fn target(kind: MotionKind, ctx: &EditContext<'_>) -> usize {
    let cursor = ctx.view.selection.cursor();
    let bpl = ctx.view.scroller.geometry().bytes_per_line.max(1);
    let addr = match kind {
        MotionKind::Left => cursor.saturating_sub(1),
        MotionKind::Right => cursor.saturating_add(1),
        MotionKind::Up => cursor.saturating_sub(bpl),
        MotionKind::Down => cursor.saturating_add(bpl),
    };
    addr.min(ctx.document.size())
}

fn apply(ctx: &mut EditContext<'_>, f: impl FnOnce(&mut EditContext<'_>)) -> DispatchResult {
    let before = ctx.view.selection.snapshot();
    f(ctx);
    DispatchResult::dirty_if(ctx.view.selection.snapshot() != before)
}

pub(crate) fn handle_motion(kind: MotionKind, ctx: &mut EditContext<'_>) -> DispatchResult {
    let addr = target(kind, ctx);
    apply(ctx, |ctx| {
        let len = ctx.document.size();
        ctx.view.selection.move_to(addr, len);
    })
}

pub(crate) fn handle_extend_motion(kind: MotionKind, ctx: &mut EditContext<'_>) -> DispatchResult {
    let addr = target(kind, ctx);
    apply(ctx, |ctx| {
        let len = ctx.document.size();
        ctx.view.selection.extend_selection(addr, len);
    })
}

pub(crate) fn handle_move_to(addr: usize, ctx: &mut EditContext<'_>) -> DispatchResult {
    apply(ctx, |ctx| {
        let len = ctx.document.size();
        ctx.view.selection.move_to(addr, len);
    })
}
