use std::error::Error as StdError;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("could not create log file {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not install log subscriber")]
    Install(#[source] Box<dyn StdError + Send + Sync + 'static>),
}

/// Sends `tracing` output to `log_file`, filtered by `RUST_LOG`. The terminal is
/// the display, so nothing is logged without a file.
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), LogError> {
    let Some(path) = log_file else { return Ok(()) };
    let file = File::create(path).map_err(|source| LogError::Create { path: path.to_path_buf(), source })?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(LogError::Install)
}
