//! Structured logging setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use crate::config::{LogFormat, LoggingConfig};

/// Error type for tracing initialization.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// The configured default directive does not parse.
    #[error("invalid log directive '{directive}': {message}")]
    InvalidDirective {
        /// The directive.
        directive: String,
        /// Parser message.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the filter: `RUST_LOG` wins, otherwise `execution_governor=<level>`.
///
/// # Errors
///
/// Returns `InvalidDirective` if `level` is not a valid directive.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, TracingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = format!("execution_governor={}", config.level);
    let parsed = directive
        .parse::<Directive>()
        .map_err(|e| TracingError::InvalidDirective {
            directive: directive.clone(),
            message: e.to_string(),
        })?;

    Ok(EnvFilter::new("warn").add_directive(parsed))
}

/// Install the global subscriber in the configured format.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingError> {
    let filter = build_env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    result.map_err(|e| TracingError::SubscriberError(e.to_string()))
}
