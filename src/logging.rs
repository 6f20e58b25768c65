// Logging
// File-backed tracing; the terminal belongs to the TUI

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log directory
pub const LOG_DIR_ENV: &str = "WIDGET_DASHBOARD_LOG_DIR";

/// Log directory: the override when set, else a folder under the temp dir
pub fn resolve_log_dir(override_dir: Option<PathBuf>) -> PathBuf {
    override_dir.unwrap_or_else(|| std::env::temp_dir().join("widget-dashboard"))
}

/// Create `dir` and open this process's log file in append mode
fn open_log_file(dir: &Path) -> Option<(File, PathBuf)> {
    fs::create_dir_all(dir).ok()?;
    let path = dir.join(format!("widget-dashboard.{}.log", std::process::id()));
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;
    Some((file, path))
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("widget_dashboard=trace,debug")
        } else {
            EnvFilter::new("widget_dashboard=debug,info")
        }
    })
}

/// Install the global subscriber
///
/// Returns the log file path, or `None` when the directory is not writable.
/// In that case logging stays off rather than writing over the screen.
pub fn setup_tracing(verbose: bool) -> Option<PathBuf> {
    let dir = resolve_log_dir(std::env::var_os(LOG_DIR_ENV).map(PathBuf::from));
    let (file, path) = open_log_file(&dir)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(file_layer)
        .try_init()
        .ok()?;

    tracing::info!(path = %path.display(), "tracing initialized");
    Some(path)
}
