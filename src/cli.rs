//! Command-line interface for warden.
//!
//! The entrypoint is configured through the container environment, so the
//! CLI surface is intentionally small: a logging override for debugging a
//! misbehaving container interactively.
use std::str::FromStr;

use clap::Parser;
use tracing::level_filters::LevelFilter;

/// Wrapper around `LevelFilter` so clap can parse log levels from either
/// string names ("info", "debug", etc.) or numeric shorthands (0-5).
#[derive(Clone, Copy, Debug)]
pub struct LogLevelArg(LevelFilter);

impl LogLevelArg {
    /// String representation suitable for `RUST_LOG`.
    pub fn as_str(&self) -> &'static str {
        match self.0 {
            LevelFilter::OFF => "off",
            LevelFilter::ERROR => "error",
            LevelFilter::WARN => "warn",
            LevelFilter::INFO => "info",
            LevelFilter::DEBUG => "debug",
            LevelFilter::TRACE => "trace",
        }
    }
}

impl FromStr for LogLevelArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let level = match value.trim().to_ascii_lowercase().as_str() {
            "" => return Err("log level cannot be empty".into()),
            "0" | "off" => LevelFilter::OFF,
            "1" | "error" | "err" => LevelFilter::ERROR,
            "2" | "warn" | "warning" => LevelFilter::WARN,
            "3" | "info" => LevelFilter::INFO,
            "4" | "debug" => LevelFilter::DEBUG,
            "5" | "trace" => LevelFilter::TRACE,
            other => return Err(format!("invalid log level '{other}'")),
        };

        Ok(LogLevelArg(level))
    }
}

/// Command-line interface for warden.
#[derive(Parser)]
#[command(name = "warden", version, author)]
#[command(
    about = "Container entrypoint supervisor for the Zoraxy reverse proxy",
    long_about = None
)]
pub struct Cli {
    /// Override the logging verbosity for this invocation only.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Parses command-line arguments.
pub fn parse_args() -> Cli {
    Cli::parse()
}
