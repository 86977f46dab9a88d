//! Logging Setup
//!
//! The terminal UI owns stdout, so interactive runs log to a file. The
//! headless timeline logs to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// Append to this file
    File(PathBuf),
}

/// Log file for interactive runs (`$XDG_STATE_HOME/botmatata/hero.log`)
///
/// Falls back to the temp dir on platforms without a state dir.
#[must_use]
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("botmatata")
        .join("hero.log")
}

/// `RUST_LOG` if set, else `level`
pub fn build_filter(level: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}")),
    }
}

/// Install the global subscriber
pub fn init(level: &str, target: &LogTarget) -> anyhow::Result<()> {
    let filter = build_filter(level)?;

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("installing log subscriber")?,
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating log directory {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .context("installing log subscriber")?;
        }
    }

    Ok(())
}
