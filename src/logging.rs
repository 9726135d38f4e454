//! Log file setup.
//!
//! Lines look like `[INFO] 2024-05-01 12:00:00,123 - Sending message: "x"`
//! and are appended to a single file that is never rotated.

use crate::config::Config;
use chrono::Local;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_LOG_FILE: &str = "write-serial.log";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Install(#[from] log::SetLoggerError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub path: PathBuf,
    pub level: LevelFilter,
    /// Set when the configured level name was not recognized.
    pub unknown_level: Option<String>,
}

impl LogSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> LogSettings {
        let path = config.log_file.clone().unwrap_or_else(default_log_path);
        match parse_level(&config.log_level) {
            Some(level) => LogSettings {
                path,
                level,
                unknown_level: None,
            },
            None => LogSettings {
                path,
                level: LevelFilter::Info,
                unknown_level: Some(config.log_level.clone()),
            },
        }
    }
}

/// Level names as accepted in `LOGLEVEL`, case-insensitive.
#[must_use]
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(LevelFilter::Trace),
        "DEBUG" => Some(LevelFilter::Debug),
        "INFO" => Some(LevelFilter::Info),
        "WARNING" | "WARN" => Some(LevelFilter::Warn),
        "ERROR" | "CRITICAL" => Some(LevelFilter::Error),
        "OFF" => Some(LevelFilter::Off),
        _ => None,
    }
}

#[must_use]
pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// The executable's own path with a `.log` extension.
#[must_use]
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .map(|exe| exe.with_extension("log"))
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE))
}

fn builder(level: LevelFilter) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(level).format(|buf, record| {
        writeln!(
            buf,
            "[{}] {} - {}",
            level_name(record.level()),
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            record.args()
        )
    });
    builder
}

/// Builds a logger that appends to `path`.
///
/// # Errors
///
/// Will return `Err` if the log file cannot be opened.
pub fn file_logger(path: &Path, level: LevelFilter) -> Result<env_logger::Logger, LogError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(builder(level).target(Target::Pipe(Box::new(file))).build())
}

fn install(logger: env_logger::Logger) -> Result<(), LogError> {
    let max_level = logger.filter();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(())
}

/// Installs the process logger. Falls back to stderr when the log file
/// cannot be opened; that failure is returned alongside.
///
/// # Errors
///
/// Will return `Err` if a logger is already installed.
pub fn init(settings: &LogSettings) -> Result<Option<LogError>, LogError> {
    let (logger, open_error) = match file_logger(&settings.path, settings.level) {
        Ok(logger) => (logger, None),
        Err(e) => (
            builder(settings.level).target(Target::Stderr).build(),
            Some(e),
        ),
    };
    install(logger)?;
    Ok(open_error)
}
