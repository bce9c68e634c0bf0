//! oxhex entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use oxhex::{Session, render_dump, render_status};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "oxhex.log";

#[derive(Parser, Debug)]
#[command(name = "oxhex", version, about = "Headless hex editor")]
struct Args {
    /// File to open. A missing file starts as an empty document.
    pub path: Option<PathBuf>,
    /// Configuration file (defaults to ./oxhex.toml or the platform config dir).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Command script to replay; `-` reads stdin.
    #[arg(long = "script")]
    pub script: Option<PathBuf>,
    #[arg(long = "width", default_value_t = 80)]
    pub width: u16,
    #[arg(long = "height", default_value_t = 24)]
    pub height: u16,
    /// Write the edited bytes here after the script ran.
    #[arg(long = "write")]
    pub write: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; dropping the guard stops the writer.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Read the document bytes. A path that does not exist yet opens empty.
fn load_bytes(path: Option<&Path>) -> Result<(String, Vec<u8>)> {
    let Some(path) = path else {
        return Ok(("untitled".to_string(), Vec::new()));
    };
    let name = path.display().to_string();
    match std::fs::read(path) {
        Ok(bytes) => {
            tracing::debug!(target: "io", file = %name, size = bytes.len(), "file_read_ok");
            Ok((name, bytes))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(target: "io", file = %name, "new_file");
            Ok((name, Vec::new()))
        }
        Err(e) => {
            error!(target: "io", file = %name, ?e, "file_open_error");
            Err(e).with_context(|| format!("opening {name}"))
        }
    }
}

fn run(args: Args) -> Result<()> {
    let (name, bytes) = load_bytes(args.path.as_deref())?;
    let config = core_config::load_from(args.config.clone())?;
    let mut session = Session::open(&name, bytes, config, args.width, args.height);
    info!(
        target: "runtime.startup",
        name = name.as_str(),
        width = args.width,
        height = args.height,
        group = session.app().group(),
        config_override = args.config.is_some(),
        "bootstrap_complete"
    );

    let problems = match args.script.as_deref() {
        None => Vec::new(),
        Some(p) if p == Path::new("-") => session.replay(io::stdin().lock())?,
        Some(p) => {
            let file = std::fs::File::open(p)
                .with_context(|| format!("opening script {}", p.display()))?;
            session.replay(BufReader::new(file))?
        }
    };
    for problem in &problems {
        eprintln!("{problem}");
    }

    if let Some(out) = args.write.as_deref() {
        session.write_to(out)?;
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    stdout.write_all(render_dump(session.app(), session.view()).as_bytes())?;
    writeln!(stdout, "{}", render_status(session.app(), session.view()))?;
    Ok(())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");
    let result = run(Args::parse());
    if let Err(e) = &result {
        error!(target: "runtime", error = %e, "fatal");
    }
    info!(target: "runtime", "shutdown");
    result
}
