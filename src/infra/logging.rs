// ============================================================
// Layer 6 — Logging Setup
// ============================================================
// Installs the global tracing subscriber once, from main().
//
// Two sinks share one filter:
//   stderr              — human-readable, coloured when a TTY
//   <log_dir>/<stage>.log — plain text, appended across runs
//
// The filter comes from RUST_LOG when set, otherwise
// "spam_prep=info". Set RUST_LOG=spam_prep=debug to see the
// per-step trail (rows loaded, duplicates removed, ...).
//
// Reference: tracing-subscriber crate (registry, fmt::layer)

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::error::PipelineError;

pub const DEFAULT_DIRECTIVE: &str = "spam_prep=info";

/// Install the subscriber. With a `log_dir`, records are also
/// appended to `<log_dir>/<stage>.log`, whose path is returned.
///
/// Calling this a second time in one process is a no-op.
pub fn init(stage: &str, log_dir: Option<&Path>) -> Result<Option<PathBuf>, PipelineError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let (file_layer, log_path) = match log_dir {
        Some(dir) => {
            let (file, path) = open_log_file(dir, stage)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();

    if installed.is_err() {
        tracing::debug!("Subscriber already installed, keeping it");
    }
    Ok(log_path)
}

/// `<dir>/<stage>.log`, creating `dir` when needed.
fn open_log_file(dir: &Path, stage: &str) -> Result<(File, PathBuf), PipelineError> {
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;

    let path = dir.join(format!("{stage}.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| PipelineError::io(&path, e))?;
    Ok((file, path))
}
