use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::Result;
use clap::Parser;
use core_actions::Editor;
use core_config::Config;
use core_fs::DirWatcher;
use core_terminal::TerminalSession;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod input;
mod runtime;

use input::InputThread;
use runtime::Runtime;

const LOG_FILE: &str = "ferrite.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ferrite", version, about = "Ferrite terminal text editor")]
struct Args {
    /// File to open at startup. A missing file becomes a new buffer with that name.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `ferrite.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            core_terminal::restore_terminal();
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Watch the directory holding the startup file, or the working directory.
fn watch_root(path: Option<&Path>) -> PathBuf {
    path.and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn spawn_watcher(config: &Config, root: &Path) -> Option<DirWatcher> {
    if !config.watch().enabled {
        return None;
    }
    match DirWatcher::spawn(root, config.watch().channel_capacity) {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            warn!(target: "runtime", error = %err, "watcher_unavailable");
            None
        }
    }
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;
    let watcher = spawn_watcher(&config, &watch_root(args.path.as_deref()));
    let debounce = config.watch().debounce();

    let session = TerminalSession::start("ferrite")?;
    let (width, height) = session.size()?;
    let mut editor = Editor::new(config, width, height);
    if let Some(path) = args.path.as_deref() {
        let result = editor.open(path);
        info!(
            target: "runtime.startup",
            path = %path.display(),
            opened = result.id().is_some(),
            "bootstrap_complete"
        );
    }

    let (mut input, events) = InputThread::spawn()?;
    let mut runtime = Runtime::new(editor, events, watcher, debounce);
    let outcome = runtime.run();
    input.shutdown();
    drop(session);
    info!(target: "runtime", "exit");
    outcome
}
