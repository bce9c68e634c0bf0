//! KeyTranslator: stateful event -> Action translation.
//!
//! Keys are stateless per event and depend only on the view's mode. Mouse
//! input carries a little state across events: the press address (drag
//! anchor), whether the press was shift-extended, and whether motion has
//! already turned the press into a drag.
//!
//! Normal mode bindings:
//! * `h`/Left, `l`/Right, `k`/Up, `j`/Down move; Shift+arrow extends.
//! * `x` / `y` select the byte under the cursor when nothing is selected,
//!   then cut / copy.
//! * `p` paste, `u` undo, `r` redo, `i` insert mode, `o` overwrite mode.
//!
//! Insert / Overwrite: hex digits feed nibbles, Backspace steps back a
//! nibble, Esc cancels, arrows still move. Unmapped keys yield no actions.

use crate::{Action, MotionKind};
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use core_state::Mode;
use smallvec::{SmallVec, smallvec};

/// Actions produced by one input event, in dispatch order.
pub type ActionBatch = SmallVec<[Action; 2]>;

#[derive(Debug, Default)]
pub struct KeyTranslator {
    /// Address of the last button press while the button is held.
    pressed_at: Option<usize>,
    /// The held press was a shift-click.
    shift_press: bool,
    /// Motion has been seen since the press.
    dragging: bool,
}

fn arrow(code: KeyCode) -> Option<MotionKind> {
    match code {
        KeyCode::Left => Some(MotionKind::Left),
        KeyCode::Right => Some(MotionKind::Right),
        KeyCode::Up => Some(MotionKind::Up),
        KeyCode::Down => Some(MotionKind::Down),
        _ => None,
    }
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any held mouse button.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn translate(&mut self, mode: Mode, event: &InputEvent) -> ActionBatch {
        match event {
            InputEvent::Key(key) => self.translate_key(mode, key),
            InputEvent::Mouse(mouse) => self.translate_mouse(mouse),
            InputEvent::Resize(w, h) => smallvec![Action::Resize(*w, *h)],
        }
    }

    pub fn translate_key(&self, mode: Mode, key: &KeyEvent) -> ActionBatch {
        if let Some(kind) = arrow(key.code) {
            return if key.mods.contains(KeyModifiers::SHIFT) {
                smallvec![Action::ExtendMotion(kind)]
            } else {
                smallvec![Action::Motion(kind)]
            };
        }
        if key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) {
            return ActionBatch::new();
        }
        match mode {
            Mode::Normal => normal_key(key.code),
            Mode::Insert | Mode::Overwrite => input_key(key.code),
        }
    }

    pub fn translate_mouse(&mut self, mouse: &MouseEvent) -> ActionBatch {
        match mouse.kind {
            MouseEventKind::Down => {
                self.pressed_at = Some(mouse.addr);
                self.shift_press = mouse.shift();
                self.dragging = false;
                if self.shift_press {
                    smallvec![Action::CancelInput, Action::ExtendSelection(mouse.addr)]
                } else {
                    smallvec![Action::CancelInput, Action::MoveTo(mouse.addr)]
                }
            }
            MouseEventKind::Drag => {
                let Some(anchor) = self.pressed_at else {
                    return ActionBatch::new();
                };
                if self.shift_press {
                    self.dragging = true;
                    return smallvec![Action::ExtendSelection(mouse.addr)];
                }
                if !self.dragging {
                    self.dragging = true;
                    return smallvec![Action::BeginDrag(anchor), Action::DragTo(mouse.addr)];
                }
                smallvec![Action::DragTo(mouse.addr)]
            }
            MouseEventKind::Up => {
                let was_drag = self.dragging && !self.shift_press;
                self.reset();
                if was_drag {
                    smallvec![Action::EndDrag]
                } else {
                    ActionBatch::new()
                }
            }
        }
    }
}

fn normal_key(code: KeyCode) -> ActionBatch {
    let KeyCode::Char(c) = code else {
        return match code {
            KeyCode::Esc => smallvec![Action::CancelInput],
            _ => ActionBatch::new(),
        };
    };
    match c {
        'h' => smallvec![Action::Motion(MotionKind::Left)],
        'l' => smallvec![Action::Motion(MotionKind::Right)],
        'k' => smallvec![Action::Motion(MotionKind::Up)],
        'j' => smallvec![Action::Motion(MotionKind::Down)],
        'x' => smallvec![Action::SelectUnderCursor, Action::Cut],
        'y' => smallvec![Action::SelectUnderCursor, Action::Copy],
        'p' => smallvec![Action::Paste],
        'u' => smallvec![Action::Undo],
        'r' => smallvec![Action::Redo],
        'i' => smallvec![Action::EnterInsertMode],
        'o' => smallvec![Action::EnterOverwriteMode],
        _ => ActionBatch::new(),
    }
}

fn input_key(code: KeyCode) -> ActionBatch {
    match code {
        KeyCode::Char(c) if c.is_ascii_hexdigit() => smallvec![Action::FeedHexDigit(c)],
        KeyCode::Backspace => smallvec![Action::Backspace],
        KeyCode::Esc => smallvec![Action::CancelInput],
        _ => ActionBatch::new(),
    }
}
