//! Diagnostic tracing to a file, kept off the terminal the UI draws on.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::config::io::project_dirs;

const DEFAULT_FILTER: &str = "debugmate=info";

/// `--debug-log` wins; otherwise `debug.log` in the cache directory.
pub fn resolve_debug_log_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| project_dirs().map(|dirs| dirs.cache_dir().join("debug.log")))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Returns the log path, or `None` when the
/// file could not be opened and diagnostics stay off.
pub fn init_diagnostics(explicit: Option<&Path>) -> Option<PathBuf> {
    let path = resolve_debug_log_path(explicit)?;
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(path)
}
