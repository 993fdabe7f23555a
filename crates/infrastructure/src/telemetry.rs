//! Structured logging
//!
//! Installs a global `tracing` subscriber. Filter precedence: an explicit
//! override (the CLI's `-v`), then `RUST_LOG`, then the configured filter.
//! Output goes to stderr so stdout stays reserved for rendered reports.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Logging initialization errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// The rejected directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Build the effective filter for `config`
///
/// `directive_override` wins when given; otherwise `RUST_LOG` when set and
/// valid; otherwise the configured directive.
pub fn build_filter(
    config: &LoggingConfig,
    directive_override: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(directive) = directive_override {
        return parse_filter(directive);
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    parse_filter(&config.filter)
}

fn parse_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|e| TelemetryError::InvalidFilter {
        filter: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_logging(
    config: &LoggingConfig,
    directive_override: Option<&str>,
) -> Result<(), TelemetryError> {
    let filter = build_filter(config, directive_override)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true),
            )
            .try_init(),
    };

    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::debug!(
        filter = directive_override.unwrap_or(&config.filter),
        format = ?config.format,
        "Logging initialized"
    );
    Ok(())
}
