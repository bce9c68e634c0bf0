//! Normalized input events consumed by the action layer.
//!
//! Terminal or GUI front ends translate their native events into these types.
//! Mouse events are already hit-tested: they carry the byte address under the
//! pointer, not screen coordinates, since cell-to-address mapping belongs to
//! the renderer.

use std::fmt;

/// Normalized input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Viewport resize (columns, rows).
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }
}

/// Logical key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Esc,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("C-")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("A-")?;
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            other => write!(f, "<{other:?}>"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Byte address under the pointer; may equal the buffer size.
    pub addr: usize,
    pub mods: KeyModifiers,
}

impl MouseEvent {
    pub fn new(kind: MouseEventKind, addr: usize) -> Self {
        Self {
            kind,
            addr,
            mods: KeyModifiers::empty(),
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.mods |= KeyModifiers::SHIFT;
        self
    }

    pub fn shift(&self) -> bool {
        self.mods.contains(KeyModifiers::SHIFT)
    }
}

/// Primary-button mouse activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed.
    Down,
    /// Pointer moved while the button is held.
    Drag,
    /// Button released.
    Up,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display() {
        let k = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CTRL);
        assert_eq!(k.to_string(), "C-x");
        let k = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(k.to_string(), "S-<Left>");
        assert_eq!(KeyEvent::char('4').to_string(), "4");
    }

    #[test]
    fn mouse_shift_flag() {
        let m = MouseEvent::new(MouseEventKind::Down, 7);
        assert!(!m.shift());
        assert!(m.with_shift().shift());
    }
}
