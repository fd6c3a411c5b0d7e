//! Tracing setup for the `avail` binary.
//!
//! Logs go to stderr so that stdout carries only the JSON result.
//! `RUST_LOG` takes precedence over the level picked from `--verbose`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line output without timestamps
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Default level when `RUST_LOG` is unset: `warn`, `debug` with one `-v`,
/// `trace` with two or more.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Call once, before any work is done.
pub fn init(verbosity: u8, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level_for(verbosity);
        EnvFilter::new(format!("availability_engine={level},avail={level}"))
    });

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    match format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact().without_time()).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    }
    .context("Failed to initialize logging")
}
