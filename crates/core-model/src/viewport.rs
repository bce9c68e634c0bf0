//! Per-view vertical scrolling.
//!
//! The scroller keeps `top` (address of the first visible byte, always a line
//! start) such that a requested address stays on screen. Geometry is pushed in
//! by the layout pass every frame; a geometry change realigns `top` to the new
//! line width but never touches cursor or selection.

use crate::layout::Geometry;
use std::ops::Range;
use tracing::trace;

/// Compute the new top address needed to bring `addr` on screen.
///
/// Returns `None` when `addr` is already within the visible lines. Scrolling
/// up puts `addr`'s line first; scrolling down makes it the last visible line.
pub fn compute_scroll_target(top: usize, addr: usize, geometry: Geometry) -> Option<usize> {
    let bpl = geometry.bytes_per_line.max(1);
    let lps = geometry.lines_per_screen.max(1);
    let first = top / bpl;
    let line = addr / bpl;
    if line < first {
        Some(line * bpl)
    } else if line >= first + lps {
        Some((line + 1 - lps) * bpl)
    } else {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewportScroller {
    top: usize,
    geometry: Geometry,
}

impl ViewportScroller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Address of the first visible byte.
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn first_line(&self) -> usize {
        self.geometry.line_of(self.top)
    }

    /// Install new geometry. `top` snaps to the start of its line under the
    /// new bytes-per-line.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        if geometry == self.geometry {
            return;
        }
        self.geometry = geometry;
        self.top = geometry.line_of(self.top) * geometry.bytes_per_line.max(1);
        trace!(target: "model.viewport", bpl = geometry.bytes_per_line, lps = geometry.lines_per_screen, top = self.top, "geometry");
    }

    /// Scroll the minimum amount needed for `addr` (clamped to `[0, len]`) to
    /// be on screen. Returns true when `top` changed.
    pub fn scroll_to(&mut self, addr: usize, len: usize) -> bool {
        let addr = addr.min(len);
        let Some(top) = compute_scroll_target(self.top, addr, self.geometry) else {
            return false;
        };
        let top = top.min(len);
        if top == self.top {
            return false;
        }
        trace!(target: "model.viewport", from = self.top, to = top, addr, "scroll");
        self.top = top;
        true
    }

    /// True when `addr` falls inside the visible lines.
    pub fn on_screen(&self, addr: usize) -> bool {
        let span = self.geometry.bytes_per_line.max(1) * self.geometry.lines_per_screen.max(1);
        addr >= self.top && addr - self.top < span
    }

    /// Line indices to draw for a document of `len` bytes. The line holding
    /// the append position is included.
    pub fn visible_lines(&self, len: usize) -> Range<usize> {
        let first = self.first_line();
        let last_line = self.geometry.line_of(len);
        let end = (first + self.geometry.lines_per_screen.max(1)).min(last_line + 1);
        first..end.max(first)
    }
}
