//! Log setup: stderr by default, or a file given with --log

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Logging setup errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Install the global subscriber.
///
/// A log file is truncated on start and written without ANSI colors.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| LoggingError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}
