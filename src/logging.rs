use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

/// Env var holding the filter directive, e.g. `INVOKER_LOG=invoker=debug`
pub const LOG_ENV: &str = "INVOKER_LOG";

/// Install a file-backed subscriber when [`LOG_ENV`] is set.
///
/// The terminal is in raw mode for the whole drill, so events never go to
/// stdout or stderr. Returns the log file path when logging is active.
pub fn init() -> Option<PathBuf> {
    let directive = std::env::var(LOG_ENV).ok()?;
    let path = AppDirs::log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}
