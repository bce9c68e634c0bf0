//! Configuration loading and parsing.
//!
//! Parses `oxhex.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [layout]
//! group = 4          # bytes-per-line is a multiple of this
//!
//! [undo]
//! history_max = 1000 # 0 keeps every record
//! ```
//!
//! The layout group is clamped to `1..=64` and to the number of byte cells
//! that fit beside the address column; the clamp lives in
//! `Config::apply_context` and is re-run whenever the viewport changes. The
//! raw parsed value is retained so a later, wider viewport can restore it.
//! Unknown fields are ignored; an unreadable or malformed file falls back to
//! defaults.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxhex.toml";
pub const MAX_GROUP: u16 = 64;
/// Cells consumed per displayed byte (hex pair, space, readable char).
const CELLS_PER_BYTE: u16 = 4;

/// Viewport facts needed to clamp layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_columns: u16,
    pub viewport_rows: u16,
    /// Width of the `ADDR: ` column for the active document.
    pub address_columns: u16,
}

impl ConfigContext {
    pub fn new(viewport_columns: u16, viewport_rows: u16, address_columns: u16) -> Self {
        Self {
            viewport_columns,
            viewport_rows,
            address_columns,
        }
    }

    /// Columns left for hex and readable cells.
    pub fn text_columns(&self) -> u16 {
        self.viewport_columns.saturating_sub(self.address_columns)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LayoutConfig {
    #[serde(default = "LayoutConfig::default_group")]
    pub group: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            group: Self::default_group(),
        }
    }
}

impl LayoutConfig {
    const fn default_group() -> u16 {
        4
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UndoConfig {
    #[serde(default = "UndoConfig::default_history_max")]
    pub history_max: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            history_max: Self::default_history_max(),
        }
    }
}

impl UndoConfig {
    const fn default_history_max() -> usize {
        1000
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub undo: UndoConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub raw: Option<String>,   // original file string (optional)
    pub file: ConfigFile,      // parsed (or default) data
    pub effective_group: u16,  // clamped to viewport semantics
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(None, ConfigFile::default())
    }
}

/// Config path: `./oxhex.toml` when present, else the platform config dir
/// (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxhex").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config::from_file(Some(content), file)),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    fn from_file(raw: Option<String>, file: ConfigFile) -> Self {
        let effective_group = file.layout.group.clamp(1, MAX_GROUP);
        Self {
            raw,
            file,
            effective_group,
        }
    }

    pub fn undo_history_max(&self) -> usize {
        self.file.undo.history_max
    }

    /// Apply viewport context to compute the clamped layout group. Returns
    /// the effective (possibly clamped) value.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> u16 {
        let raw = self.file.layout.group;
        let text_columns = ctx.text_columns();
        let max = (text_columns / CELLS_PER_BYTE).clamp(1, MAX_GROUP);
        let clamped = raw.clamp(1, max);

        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                text_columns,
                viewport_columns = ctx.viewport_columns,
                viewport_rows = ctx.viewport_rows,
                address_columns = ctx.address_columns,
                "layout_group_clamped"
            );
        }
        self.effective_group = clamped;
        clamped
    }

    /// Recompute the effective group after a viewport change. Returns
    /// `Some(new_group)` when the effective value changed, else `None`.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<u16> {
        let prev = self.effective_group;
        let current = self.apply_context(ctx);
        if current != prev { Some(current) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    fn ctx_with_columns(columns: u16) -> ConfigContext {
        // 5 address columns: "FFF: "
        ConfigContext::new(columns, 24, 5)
    }

    fn load_str(content: &str) -> Config {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), content).unwrap();
        load_from(Some(tmp.path().to_path_buf())).unwrap()
    }

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, f);
        let out = buffer.lock().unwrap().clone();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file.layout.group, 4);
        assert_eq!(cfg.effective_group, 4);
        assert_eq!(cfg.undo_history_max(), 1000);
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn parses_layout_and_undo_values() {
        let mut cfg = load_str("[layout]\ngroup = 8\n[undo]\nhistory_max = 25\n");
        assert_eq!(cfg.file.layout.group, 8);
        assert_eq!(cfg.undo_history_max(), 25);
        assert!(cfg.raw.is_some());
        cfg.apply_context(ctx_with_columns(120)); // ample width, no clamp
        assert_eq!(cfg.effective_group, 8);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let cfg = load_str("[layout\ngroup = ");
        assert_eq!(cfg.file.layout.group, 4);
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = load_str("[undo]\nhistory_max = 0\n");
        assert_eq!(cfg.file.layout.group, 4);
        assert_eq!(cfg.undo_history_max(), 0);
    }

    #[test]
    fn clamps_group_to_range() {
        let mut cfg = load_str("[layout]\ngroup = 0\n");
        assert_eq!(cfg.effective_group, 1);
        assert_eq!(cfg.apply_context(ctx_with_columns(200)), 1);

        let mut cfg = load_str("[layout]\ngroup = 500\n");
        assert_eq!(cfg.effective_group, MAX_GROUP);
        // (400 - 5) / 4 = 98 cells fit; cap stays at 64.
        assert_eq!(cfg.apply_context(ctx_with_columns(400)), MAX_GROUP);
    }

    #[test]
    fn recompute_with_context_tracks_viewport_width() {
        let mut cfg = load_str("[layout]\ngroup = 16\n");
        cfg.apply_context(ctx_with_columns(120)); // (120-5)/4 = 28 >= 16
        assert_eq!(cfg.effective_group, 16);
        // (45-5)/4 = 10 -> group clamps to 10
        assert_eq!(cfg.recompute_with_context(ctx_with_columns(45)), Some(10));
        assert_eq!(cfg.recompute_with_context(ctx_with_columns(46)), None);
        // Widening restores the raw value.
        assert_eq!(cfg.recompute_with_context(ctx_with_columns(120)), Some(16));
    }

    #[test]
    fn degenerate_viewport_keeps_group_one() {
        let mut cfg = Config::default();
        assert_eq!(cfg.apply_context(ConfigContext::new(0, 0, 5)), 1);
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let mut cfg = load_str("[layout]\ngroup = 32\n");
        let log_output = capture(|| {
            // (40 - 5) / 4 = 8
            cfg.apply_context(ctx_with_columns(40));
        });
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("layout_group_clamped"));
        assert_eq!(cfg.effective_group, 8);
    }

    #[test]
    fn no_log_without_clamp() {
        let mut cfg = Config::default();
        let log_output = capture(|| {
            cfg.apply_context(ctx_with_columns(80));
        });
        assert!(log_output.is_empty());
    }
}
