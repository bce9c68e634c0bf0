//! Text rendering of a view: the visible dump lines and a status line.
//!
//! A dump line is `ADDR: HH HH .. ascii`. Short final lines are padded so the
//! readable column stays aligned.

use core_model::{ApplicationState, ViewId, address_label, num_hex_digits, printable};
use core_state::Mode;
use std::fmt::Write;

/// Visible lines of `view`, one per row, newline terminated.
pub fn render_dump(app: &ApplicationState, view: ViewId) -> String {
    let Some(v) = app.view(view) else {
        return String::new();
    };
    let Some(doc) = app.document(v.document) else {
        return String::new();
    };
    let len = doc.size();
    let bpl = v.scroller.geometry().bytes_per_line.max(1);
    let digits = num_hex_digits(len);
    let mut out = String::new();
    for line in v.scroller.visible_lines(len) {
        let start = line * bpl;
        let bytes = doc.buffer().read_range(start, bpl);
        out.push_str(&address_label(start, digits));
        out.push(' ');
        for b in &bytes {
            let _ = write!(out, "{b:02X} ");
        }
        for _ in bytes.len()..bpl {
            out.push_str("   ");
        }
        out.extend(bytes.iter().map(|b| printable(*b)));
        out.push('\n');
    }
    out
}

/// `MODE [nibbles] | cursor 0x.. | sel 0x..+n | N bytes [| modified]`
pub fn render_status(app: &ApplicationState, view: ViewId) -> String {
    let Some(v) = app.view(view) else {
        return String::new();
    };
    let Some(doc) = app.document(v.document) else {
        return String::new();
    };
    let mode = v.edit.mode();
    let mut out = String::from(mode.as_str());
    if mode != Mode::Normal {
        out.push(' ');
        out.push_str(&v.edit.input().pending_label());
    }
    let (start, size) = v.selection.selection();
    let _ = write!(
        out,
        " | cursor 0x{:X} | sel 0x{start:X}+{size} | {} bytes",
        v.selection.cursor(),
        doc.size()
    );
    if doc.is_dirty() {
        out.push_str(" | modified");
    }
    out
}
