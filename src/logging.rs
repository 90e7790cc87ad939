//! `tracing` subscriber setup
//!
//! Logs go to a file (never rotated) through a non-blocking writer. Keep the
//! returned [`WorkerGuard`] alive for as long as logs should be flushed.

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LOG_FILE_NAME, LoggingConfig, data_dir};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Global subscriber already set: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber, logging to the configured directory
/// (or [`data_dir`] when unset)
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    let directory = config.directory.clone().unwrap_or_else(data_dir);
    init_logging_to(&directory, config)
}

/// Install the global subscriber, logging to `directory/version-infer.log`
pub fn init_logging_to(directory: &Path, config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    std::fs::create_dir_all(directory)?;

    let filter = match std::env::var("RUST_LOG") {
        Ok(directive) if !directive.is_empty() => env_filter(&directive)?,
        _ => env_filter(&config.level)?,
    };

    let appender = tracing_appender::rolling::never(directory, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(fmt::layer().json().with_writer(writer).with_ansi(false))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .try_init()?;
    }

    Ok(guard)
}

/// Build a filter from a directive such as `info` or `version_infer=debug`
pub fn env_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    Ok(EnvFilter::try_new(directive)?)
}
