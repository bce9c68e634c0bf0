//! Cut / copy / paste against the shared clipboard.

use super::DispatchResult;
use core_model::EditContext;
use core_state::{EditError, clipboard};

pub(crate) fn handle_cut(ctx: &mut EditContext<'_>) -> Result<DispatchResult, EditError> {
    clipboard::cut(ctx.document, &mut ctx.view.selection, ctx.clipboard)?;
    Ok(DispatchResult::buffer_changed())
}

pub(crate) fn handle_copy(ctx: &mut EditContext<'_>) -> Result<DispatchResult, EditError> {
    clipboard::copy(ctx.document, &mut ctx.view.selection, ctx.clipboard)?;
    Ok(DispatchResult::dirty())
}

pub(crate) fn handle_paste(ctx: &mut EditContext<'_>) -> Result<DispatchResult, EditError> {
    let pasted = clipboard::paste(ctx.document, &mut ctx.view.selection, ctx.clipboard)?;
    Ok(if pasted {
        DispatchResult::buffer_changed()
    } else {
        DispatchResult::clean()
    })
}
