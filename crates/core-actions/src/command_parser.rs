//! Script command parsing.
//!
//! The headless driver replays editing sessions from text scripts, one
//! command per line. `CommandParser::parse` classifies a line into the
//! `Action`s it stands for; mouse-style commands expand to the same action
//! sequence `KeyTranslator` produces for the equivalent pointer events.
//!
//! Grammar (whitespace separated, case sensitive):
//!
//! ```text
//! left | right | up | down            move one byte / one line
//! shift-left | shift-right | ...      extend the selection one step
//! goto N                              move to an address
//! click N | shift-click N             mouse press at an address
//! drag A B                            press at A, drag to B, release
//! extend N                            extend the selection toward N
//! select                              select the byte under the cursor
//! cut | copy | paste | undo | redo
//! insert | overwrite | cancel | backspace
//! hex DIGITS                          feed hex digits (e.g. `hex 4142`)
//! resize W H
//! # comment
//! ```
//!
//! Numbers are decimal or `0x`-prefixed hex. Parsing is pure; unknown or
//! malformed lines come back as `ParsedCommand::Unknown` for the caller to
//! report.

use crate::{Action, MotionKind};
use smallvec::{SmallVec, smallvec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Blank line or comment.
    Empty,
    Actions(SmallVec<[Action; 4]>),
    Unknown(String),
}

/// Parse `42` or `0x2A`.
pub fn parse_number(s: &str) -> Option<usize> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn parse_dimension(s: &str) -> Option<u16> {
    parse_number(s).and_then(|n| u16::try_from(n).ok())
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return ParsedCommand::Empty;
        }
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return ParsedCommand::Empty;
        };
        let args: SmallVec<[&str; 2]> = words.collect();
        match Self::classify(head, &args) {
            Some(actions) => ParsedCommand::Actions(actions),
            None => ParsedCommand::Unknown(line.to_string()),
        }
    }

    fn classify(head: &str, args: &[&str]) -> Option<SmallVec<[Action; 4]>> {
        let one = |action: Action| -> Option<SmallVec<[Action; 4]>> {
            args.is_empty().then(|| smallvec![action])
        };
        let addr = || -> Option<usize> {
            match args {
                [n] => parse_number(n),
                _ => None,
            }
        };
        match head {
            "left" => one(Action::Motion(MotionKind::Left)),
            "right" => one(Action::Motion(MotionKind::Right)),
            "up" => one(Action::Motion(MotionKind::Up)),
            "down" => one(Action::Motion(MotionKind::Down)),
            "shift-left" => one(Action::ExtendMotion(MotionKind::Left)),
            "shift-right" => one(Action::ExtendMotion(MotionKind::Right)),
            "shift-up" => one(Action::ExtendMotion(MotionKind::Up)),
            "shift-down" => one(Action::ExtendMotion(MotionKind::Down)),
            "goto" => Some(smallvec![Action::MoveTo(addr()?)]),
            "extend" => Some(smallvec![Action::ExtendSelection(addr()?)]),
            "click" => Some(smallvec![Action::CancelInput, Action::MoveTo(addr()?)]),
            "shift-click" => Some(smallvec![
                Action::CancelInput,
                Action::ExtendSelection(addr()?)
            ]),
            "drag" => {
                let [from, to] = args else {
                    return None;
                };
                let (from, to) = (parse_number(from)?, parse_number(to)?);
                Some(smallvec![
                    Action::CancelInput,
                    Action::MoveTo(from),
                    Action::BeginDrag(from),
                    Action::DragTo(to),
                    Action::EndDrag,
                ])
            }
            "select" => one(Action::SelectUnderCursor),
            "cut" => one(Action::Cut),
            "copy" => one(Action::Copy),
            "paste" => one(Action::Paste),
            "undo" => one(Action::Undo),
            "redo" => one(Action::Redo),
            "insert" => one(Action::EnterInsertMode),
            "overwrite" => one(Action::EnterOverwriteMode),
            "cancel" => one(Action::CancelInput),
            "backspace" => one(Action::Backspace),
            "hex" => {
                let [digits] = args else {
                    return None;
                };
                if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                    return None;
                }
                Some(digits.chars().map(Action::FeedHexDigit).collect())
            }
            "resize" => {
                let [w, h] = args else {
                    return None;
                };
                Some(smallvec![Action::Resize(
                    parse_dimension(w)?,
                    parse_dimension(h)?
                )])
            }
            _ => None,
        }
    }
}
