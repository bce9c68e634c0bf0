//! Edit mode state machine and two-nibble hex entry.
//!
//! `Normal` is the initial mode. An explicit command switches to `Insert` or
//! `Overwrite`; cancel (Esc) or backspacing past an empty accumulator returns
//! to `Normal`. The accumulator only produces a byte once both nibbles are in;
//! nothing partial ever reaches the buffer, so cancelling is a pure state
//! reset.

use tracing::debug;

/// Current edit mode of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation / selection / clipboard commands.
    #[default]
    Normal,
    /// Completed bytes are inserted before the cursor.
    Insert,
    /// Completed bytes replace the byte under the cursor.
    Overwrite,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Overwrite => "OVERWRITE",
        }
    }
}

/// Hex digits typed so far for the byte being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NibbleInput {
    hi: u8,
    lo: u8,
    entered: u8,
}

impl NibbleInput {
    pub fn entered(&self) -> u8 {
        self.entered
    }

    /// Placeholder text for the cell being edited: `__`, `4_`.
    pub fn pending_label(&self) -> String {
        match self.entered {
            0 => "__".to_string(),
            1 => format!("{:X}_", self.hi),
            _ => format!("{:X}{:X}", self.hi, self.lo),
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of feeding one character to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NibbleOutcome {
    /// Not a hex digit, or no input mode active.
    Ignored,
    /// First nibble stored.
    Pending,
    /// Second nibble stored; the byte is ready to commit.
    Complete(u8),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditModeController {
    mode: Mode,
    input: NibbleInput,
}

impl EditModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> NibbleInput {
        self.input
    }

    /// Switch modes, resetting the accumulator. Overwrite degrades to Insert
    /// when the cursor is on end-of-data (no byte to replace). Returns the
    /// mode actually entered.
    pub fn enter_mode(&mut self, requested: Mode, cursor_at_end: bool) -> Mode {
        let mode = match requested {
            Mode::Overwrite if cursor_at_end => Mode::Insert,
            m => m,
        };
        self.input.reset();
        if mode != self.mode {
            debug!(target: "state.mode", from = self.mode.as_str(), to = mode.as_str(), "mode_change");
        }
        self.mode = mode;
        mode
    }

    pub fn feed_nibble(&mut self, digit: char) -> NibbleOutcome {
        if self.mode == Mode::Normal {
            return NibbleOutcome::Ignored;
        }
        let Some(value) = digit.to_digit(16) else {
            return NibbleOutcome::Ignored;
        };
        let value = value as u8;
        if self.input.entered == 0 {
            self.input.hi = value;
            self.input.entered = 1;
            NibbleOutcome::Pending
        } else {
            self.input.lo = value;
            let byte = self.input.hi << 4 | self.input.lo;
            self.input.reset();
            NibbleOutcome::Complete(byte)
        }
    }

    /// Used when an Overwrite commit finds the cursor on end-of-data.
    pub fn degrade_to_insert(&mut self) {
        if self.mode == Mode::Overwrite {
            debug!(target: "state.mode", "overwrite_degraded_at_eof");
            self.mode = Mode::Insert;
        }
    }

    /// Abandon any partial byte and return to Normal.
    pub fn cancel(&mut self) {
        self.enter_mode(Mode::Normal, false);
    }

    /// Step back one nibble; backing out of an empty accumulator cancels.
    pub fn backspace(&mut self) {
        if self.input.entered == 0 {
            self.cancel();
        } else {
            self.input.entered -= 1;
        }
    }

    /// Drop a half-typed byte while staying in the current mode.
    pub fn reset_input(&mut self) {
        self.input.reset();
    }
}
