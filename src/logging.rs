//! Diagnostics for the command line tool.
//!
//! Standard output is reserved for the formatted document or the rendered
//! query, so diagnostics go to stderr or to a log directory. Controlled by
//! `LOG_FORMAT` (`json` | `pretty`), `LOG_OUTPUT` (`stderr` | `file`) and
//! `LOG_DIR`; `RUST_LOG` overrides the level filter.

use anyhow::{Context, Result};
use std::env;
use std::io;
use std::path::PathBuf;
use strum::{Display, EnumString};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "wikidata-display";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Where diagnostics are written.
///
/// `stdout` is accepted as a spelling of [`LogOutput::Stderr`] so that log
/// lines never interleave with the JSON written to standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogOutput {
    #[strum(to_string = "stderr", serialize = "stdout")]
    Stderr,
    /// Daily-rotated files under `log_dir`
    File,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub output: LogOutput,
    pub log_dir: PathBuf,
    /// Level used when `RUST_LOG` is unset
    pub default_level: &'static str,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            output: LogOutput::Stderr,
            log_dir: PathBuf::from("logs"),
            default_level: "warn",
        }
    }
}

impl LoggingConfig {
    /// Read `LOG_FORMAT`, `LOG_OUTPUT` and `LOG_DIR`. Unrecognised values keep
    /// the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(format) = lookup("LOG_FORMAT").and_then(|v| v.trim().parse().ok()) {
            config.format = format;
        }
        if let Some(output) = lookup("LOG_OUTPUT").and_then(|v| v.trim().parse().ok()) {
            config.output = output;
        }
        if let Some(dir) = lookup("LOG_DIR").filter(|v| !v.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }

        config
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines when dropped; hold it until the
/// command finishes.
pub fn init_logging(config: LoggingConfig) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_level));

    let (writer, guard) = match config.output {
        LogOutput::Stderr => tracing_appender::non_blocking(io::stderr()),
        LogOutput::File => {
            std::fs::create_dir_all(&config.log_dir).with_context(|| {
                format!("failed to create log directory {}", config.log_dir.display())
            })?;
            tracing_appender::non_blocking(tracing_appender::rolling::daily(
                &config.log_dir,
                LOG_FILE_PREFIX,
            ))
        }
    };

    let layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(true)
            .with_filter(filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_writer(writer)
            .with_target(false)
            .with_ansi(config.output == LogOutput::Stderr)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::debug!(format = %config.format, output = %config.output, "logging initialized");

    Ok(guard)
}

/// Span wrapping one subcommand run.
pub fn command_span(command: &'static str) -> tracing::Span {
    tracing::info_span!("command", command.name = command, version = env!("CARGO_PKG_VERSION"))
}
