#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, CommandParser, DispatchResult, KeyTranslator, ParsedCommand, dispatch};
use core_buffer::VecBuffer;
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use core_model::{ApplicationState, ViewId};
use core_state::{Document, EditError, Mode};

/// An application with one open document, driven the way a front end does:
/// events -> `KeyTranslator` -> `dispatch`.
pub struct Session {
    pub app: ApplicationState,
    pub translator: KeyTranslator,
    pub view: ViewId,
}

impl Session {
    pub fn new(bytes: &[u8]) -> Self {
        let mut app = ApplicationState::new();
        let view = app.open_document("session.bin", VecBuffer::from_bytes(bytes.to_vec()));
        Self {
            app,
            translator: KeyTranslator::new(),
            view,
        }
    }

    pub fn mode(&self) -> Mode {
        self.app.active_view().unwrap().edit.mode()
    }

    pub fn event(&mut self, event: InputEvent) -> Vec<Result<DispatchResult, EditError>> {
        let batch = self.translator.translate(self.mode(), &event);
        batch
            .into_iter()
            .map(|a| dispatch(a, &mut self.app))
            .collect()
    }

    /// Type characters as plain key presses; every action must succeed.
    pub fn keys(&mut self, keys: &str) {
        for c in keys.chars() {
            for r in self.event(InputEvent::Key(KeyEvent::char(c))) {
                r.unwrap();
            }
        }
    }

    pub fn key(&mut self, code: KeyCode, mods: KeyModifiers) -> Vec<Result<DispatchResult, EditError>> {
        self.event(InputEvent::Key(KeyEvent::new(code, mods)))
    }

    pub fn mouse(&mut self, kind: MouseEventKind, addr: usize, shift: bool) {
        let mut ev = MouseEvent::new(kind, addr);
        if shift {
            ev = ev.with_shift();
        }
        for r in self.event(InputEvent::Mouse(ev)) {
            r.unwrap();
        }
    }

    /// Run script lines, collecting error messages and unknown commands.
    pub fn script(&mut self, script: &str) -> Vec<String> {
        let mut problems = Vec::new();
        for line in script.lines() {
            match CommandParser::parse(line) {
                ParsedCommand::Empty => {}
                ParsedCommand::Unknown(l) => problems.push(format!("unknown: {l}")),
                ParsedCommand::Actions(actions) => {
                    for a in actions {
                        if let Err(e) = dispatch(a, &mut self.app) {
                            problems.push(e.to_string());
                        }
                    }
                }
            }
        }
        problems
    }

    pub fn run(&mut self, actions: &[Action]) {
        for a in actions {
            dispatch(*a, &mut self.app).unwrap();
        }
    }

    pub fn document(&self) -> &Document {
        let view = self.app.active_view().unwrap();
        self.app.document(view.document).unwrap()
    }

    pub fn bytes(&self) -> Vec<u8> {
        let doc = self.document();
        doc.buffer().read_range(0, doc.size())
    }

    pub fn cursor(&self) -> usize {
        self.app.active_view().unwrap().selection.cursor()
    }

    pub fn selection(&self) -> (usize, usize) {
        self.app.active_view().unwrap().selection.selection()
    }

    pub fn clipboard(&self) -> Option<Vec<u8>> {
        self.app
            .clipboard()
            .contents()
            .map(|c| c.as_bytes().to_vec())
    }
}
