//! One open document plus the configuration that shapes its layout.

use anyhow::{Context, Result};
use core_actions::{Action, CommandParser, ParsedCommand, dispatch};
use core_buffer::VecBuffer;
use core_config::{Config, ConfigContext};
use core_model::{ApplicationState, ViewId, address_column_width};
use core_state::EditError;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

/// A script line that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptProblem {
    Unknown { line: usize, text: String },
    Rejected { line: usize, error: EditError },
}

impl fmt::Display for ScriptProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptProblem::Unknown { line, text } => {
                write!(f, "line {line}: unknown command `{text}`")
            }
            ScriptProblem::Rejected { line, error } => write!(f, "line {line}: {error}"),
        }
    }
}

pub struct Session {
    app: ApplicationState,
    config: Config,
    view: ViewId,
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Session {
    /// Open `bytes` under `name` in a `width` x `height` viewport.
    pub fn open(name: &str, bytes: Vec<u8>, mut config: Config, width: u16, height: u16) -> Self {
        let ctx = ConfigContext::new(width, height, clamp_u16(address_column_width(bytes.len())));
        let group = config.apply_context(ctx);
        let mut app = ApplicationState::new();
        app.set_group(group as usize);
        app.set_undo_history_max(config.undo_history_max());
        app.resize(width, height);
        let view = app.open_document(name, VecBuffer::from_bytes(bytes));
        Self { app, config, view }
    }

    pub fn app(&self) -> &ApplicationState {
        &self.app
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn bytes(&self) -> Vec<u8> {
        let doc = self.document();
        doc.buffer().read_range(0, doc.size())
    }

    pub fn is_dirty(&self) -> bool {
        self.document().is_dirty()
    }

    fn document(&self) -> &core_state::Document {
        let doc = self.app.view(self.view).map(|v| v.document);
        match doc.and_then(|d| self.app.document(d)) {
            Some(doc) => doc,
            None => panic!("session view {} lost its document", self.view.0),
        }
    }

    /// Apply one action, re-clamping the layout group when the viewport
    /// changes.
    pub fn apply(&mut self, action: Action) -> Result<(), EditError> {
        if let Action::Resize(w, h) = action {
            let size = self.document().size();
            let ctx = ConfigContext::new(w, h, clamp_u16(address_column_width(size)));
            if let Some(group) = self.config.recompute_with_context(ctx) {
                debug!(target: "runtime", group, "layout_group_changed");
                self.app.set_group(group as usize);
            }
        }
        dispatch(action, &mut self.app).map(|_| ())
    }

    /// Run a single script line. Line numbers are only used for reporting.
    pub fn run_line(&mut self, line_no: usize, line: &str) -> Vec<ScriptProblem> {
        match CommandParser::parse(line) {
            ParsedCommand::Empty => Vec::new(),
            ParsedCommand::Unknown(text) => {
                warn!(target: "runtime", line = line_no, text = %text, "unknown_command");
                vec![ScriptProblem::Unknown {
                    line: line_no,
                    text,
                }]
            }
            ParsedCommand::Actions(actions) => actions
                .into_iter()
                .filter_map(|a| self.apply(a).err())
                .map(|error| {
                    debug!(target: "runtime", line = line_no, %error, "command_rejected");
                    ScriptProblem::Rejected {
                        line: line_no,
                        error,
                    }
                })
                .collect(),
        }
    }

    /// Replay a whole script. Problems are collected, not fatal; only read
    /// failures abort.
    pub fn replay(&mut self, script: impl BufRead) -> Result<Vec<ScriptProblem>> {
        let mut problems = Vec::new();
        for (idx, line) in script.lines().enumerate() {
            let line = line.context("reading script")?;
            problems.extend(self.run_line(idx + 1, &line));
        }
        info!(target: "runtime", problems = problems.len(), "script_replayed");
        Ok(problems)
    }

    /// Write the current bytes to `path` and clear the dirty flag.
    pub fn write_to(&mut self, path: &Path) -> Result<()> {
        let bytes = self.bytes();
        std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        let doc_id = self.app.view(self.view).map(|v| v.document);
        if let Some(doc) = doc_id.and_then(|d| self.app.document_mut(d)) {
            doc.mark_clean();
        }
        info!(target: "runtime", path = %path.display(), size = bytes.len(), "file_written");
        Ok(())
    }
}
