//! Logging setup.

use std::path::Path;
use thiserror::Error;
use tracing::Dispatch;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log file path: {0}")]
    InvalidPath(String),

    #[error("Cannot open log file: {0}")]
    Appender(#[from] InitError),

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Open `path` for appending; the file is never rotated.
fn file_appender(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(path.display().to_string()))?;
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    Ok(RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?)
}

/// Subscriber writing `timestamp LEVEL message` lines, or JSON objects.
fn file_dispatch(filter: EnvFilter, json: bool, writer: RollingFileAppender) -> Dispatch {
    if json {
        Dispatch::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(writer)),
        )
    } else {
        Dispatch::new(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(writer),
            ),
        )
    }
}

/// Setup logging with the given level, writing to `file`.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn setup_logging(level: &str, json: bool, file: &Path) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let writer = file_appender(file)?;

    file_dispatch(filter, json, writer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
