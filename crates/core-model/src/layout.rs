//! Viewport geometry for the hex dump.
//!
//! A line of the dump is `ADDR: HH HH .. ..ascii..`. Each byte costs four
//! cells (two hex digits, a separating space, one readable character), so
//! bytes-per-line is what fits after the address column, rounded down to a
//! multiple of the layout group and never below one group.
//!
//! Regions are expressed in terminal cell units (`u16`). Width/height may be
//! 0 (degenerate); derived geometry still yields at least one group per line
//! and one line per screen.

/// Cells consumed per displayed byte.
pub const CELLS_PER_BYTE: usize = 4;

/// Default byte grouping for bytes-per-line rounding.
pub const DEFAULT_GROUP: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Full-screen region at the origin.
    pub fn single(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Derived per-frame geometry of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub bytes_per_line: usize,
    pub lines_per_screen: usize,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            bytes_per_line: DEFAULT_GROUP,
            lines_per_screen: 1,
        }
    }
}

impl Geometry {
    /// Compute geometry for a document of `buffer_size` bytes shown in
    /// `region`, grouping bytes-per-line by `group` (0 is treated as 1).
    pub fn compute(region: LayoutRegion, buffer_size: usize, group: usize) -> Self {
        let group = group.max(1);
        let text_width =
            (region.width as usize).saturating_sub(address_column_width(buffer_size));
        let max_bytes = text_width / CELLS_PER_BYTE;
        let bytes_per_line = (max_bytes - max_bytes % group).max(group);
        Self {
            bytes_per_line,
            lines_per_screen: (region.height as usize).max(1),
        }
    }

    /// Line index containing `addr`.
    pub fn line_of(&self, addr: usize) -> usize {
        addr / self.bytes_per_line.max(1)
    }
}

/// Hex digits needed to print `size` (minimum 1).
pub fn num_hex_digits(size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    (usize::BITS - size.leading_zeros()).div_ceil(4) as usize
}

/// Width of the `ADDR: ` column for a document of `buffer_size` bytes.
pub fn address_column_width(buffer_size: usize) -> usize {
    num_hex_digits(buffer_size) + 2
}

/// `0001F:` style label, zero-padded to `digits`.
pub fn address_label(addr: usize, digits: usize) -> String {
    format!("{addr:0digits$X}:")
}

/// Character shown in the readable column for `byte`.
pub fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}
