//! Configuration module for the execution governor.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before anything is wired.
//!
//! # Usage
//!
//! ```rust,ignore
//! use execution_governor::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("deploy/governor.yaml"))?;
//! ```

mod governance;
mod observability;
mod server;

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use governance::GovernanceSettings;
pub use observability::{LogFormat, LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use server::ServerConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Initial governance settings.
    #[serde(default)]
    pub governance: GovernanceSettings,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Parsed metrics listener address.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the address does not parse.
    pub fn metrics_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.observability
            .metrics
            .listen_addr
            .parse()
            .map_err(|e| {
                ConfigError::ValidationError(format!(
                    "observability.metrics.listen_addr '{}' is invalid: {e}",
                    self.observability.metrics.listen_addr
                ))
            })
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml)?;
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. A `${VAR}` without a
/// default whose variable is unset or empty is an error. Full-line `#`
/// comments are copied through untouched.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    let mut result = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let mut last = 0;
        for cap in re.captures_iter(line) {
            let (Some(full_match), Some(var_match)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            let var_name = var_match.as_str();
            let default_value = cap.get(2).map(|m| m.as_str());

            let value = match (std::env::var(var_name), default_value) {
                (Ok(v), _) if !v.is_empty() => v,
                (_, Some(default)) => default.to_string(),
                (_, None) => return Err(ConfigError::MissingEnvVar(var_name.to_string())),
            };

            result.push_str(&line[last..full_match.start()]);
            result.push_str(&value);
            last = full_match.end();
        }
        result.push_str(&line[last..]);
    }

    Ok(result)
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    if config.observability.metrics.enabled {
        let metrics_addr = config.metrics_addr()?;
        if metrics_addr.port() == config.server.http_port {
            return Err(ConfigError::ValidationError(
                "metrics listener and http_port must be different".to_string(),
            ));
        }
    }

    config
        .governance
        .build_state()
        .map_err(|e| ConfigError::ValidationError(format!("governance: {e}")))?;

    Ok(())
}
