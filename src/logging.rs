//! Structured logging setup for the `fncall` binary and embedding applications.
//!
//! The library itself only emits `tracing` events; nothing is printed unless a
//! subscriber is installed, e.g. with [`init_logging_with_config`]. Output goes
//! to stderr so stdout stays free for call results.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for machines, pretty-print for humans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty, // Default to pretty for a CLI
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Extra filter directives (comma-separated), e.g. `fncall=debug,reqwest=warn`
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: env::var("FNCALL_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: env::var("FNCALL_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.format),
            target_filter: env::var("FNCALL_LOG_TARGET_FILTER").ok(),
            include_location: env::var("FNCALL_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.include_location),
        }
    }

    /// Level parsed from `log_level`, falling back to WARN.
    #[must_use]
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    }

    /// `EnvFilter` from `RUST_LOG` if set, else the configured level, plus
    /// any valid `target_filter` directives.
    pub fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',') {
                let filter = filter.trim();
                if filter.is_empty() {
                    continue;
                }
                match filter.parse() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {}", filter),
                }
            }
        }
        env_filter
    }
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_span_list(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}
