//! Tracing setup.
//!
//! The TUI owns the terminal, so interactive sessions log to a file.
//! One-shot subcommands log to stderr.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::args::LogLevel;

pub const LOG_ENV: &str = "RAT_LOG";
pub const LOG_DIR_ENV: &str = "RAT_LOG_DIR";
const LOG_FILE: &str = "rat.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    File,
    Stderr,
}

/// Directory for the TUI log: RAT_LOG_DIR, else `<data dir>/rat/logs`.
pub fn log_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join("rat").join("logs"))
        .context("could not determine a data directory for the log file; set RAT_LOG_DIR")
}

/// The flag wins over RAT_LOG; without either, `default` applies.
pub fn build_filter(level: Option<LogLevel>, default: &str) -> EnvFilter {
    if let Some(level) = level {
        return EnvFilter::new(level.as_str());
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Returns the log file path for file sinks.
pub fn init(level: Option<LogLevel>, sink: LogSink) -> Result<Option<PathBuf>> {
    match sink {
        LogSink::File => {
            let dir = log_dir()?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let path = dir.join(LOG_FILE);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true);

            tracing_subscriber::registry()
                .with(build_filter(level, "info"))
                .with(file_layer)
                .try_init()
                .context("tracing subscriber already installed")?;

            tracing::info!(path = %path.display(), "logging initialized");
            Ok(Some(path))
        }
        LogSink::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(level, "warn"))
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {}", e))?;
            Ok(None)
        }
    }
}
