//! tracing setup: append to `~/.local/state/carpenpi/carpenpi.log`, else stderr.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVES: &str = "info,carpenpi=debug";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Location of the log file under the XDG state home.
pub fn log_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("carpenpi")?;
    dirs.place_state_file("carpenpi.log")
        .context("create log directory")
}

/// Installs a subscriber that appends plain-text events to [`log_path`].
///
/// Errors leave no subscriber installed, so the caller can use [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    // `Mutex<File>` serializes writes from the download worker threads.
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "logging to file");
    Ok(path)
}

/// Installs a stderr subscriber; a no-op if one is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
