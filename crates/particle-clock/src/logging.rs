//! File logging. The terminal belongs to the TUI, so logs never go to stdout.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

const LOG_FILE: &str = "particle-clock.log";

/// Default log location under the platform data dir.
fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "particle-clock").map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

/// Install the global subscriber writing to `path` (or the default location).
///
/// Returns the log path, or `None` if the file could not be opened; logging
/// is then left disabled.
pub fn init(path: Option<&Path>) -> Option<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path()?,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true),
    );
    tracing::subscriber::set_global_default(subscriber).ok()?;
    Some(path)
}
