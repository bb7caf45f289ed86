//! Prometheus metrics for the execution governor.
//!
//! # Example
//!
//! ```ignore
//! use execution_governor::observability::{init_metrics, MetricsConfig};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config)?;
//!
//! record_execution("tiered_fee", "committed", 0.002);
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{Ipv4Addr, SocketAddr};

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for execution latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9090)),
            // 10us to 1s
            latency_buckets: vec![
                0.00001, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Execution Metrics
// ============================================================================

/// Record an execution attempt.
///
/// # Arguments
///
/// * `mode` - Execution mode (e.g., "quota_only", "tiered_fee")
/// * `outcome` - "committed" or the rejection reason code
/// * `duration_seconds` - Time spent under the governor lock
pub fn record_execution(mode: &str, outcome: &str, duration_seconds: f64) {
    counter!(
        "governor_executions_total",
        "mode" => mode.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        "governor_execution_duration_seconds",
        "mode" => mode.to_string()
    )
    .record(duration_seconds);
}

/// Record the value moved by a committed execution (base units, saturating).
pub fn record_settlement(net_fee: u64, cashback: u64, reward: u64) {
    if net_fee > 0 {
        counter!("governor_fees_collected_total").increment(net_fee);
    }
    if cashback > 0 {
        counter!("governor_cashback_paid_total").increment(cashback);
    }
    if reward > 0 {
        counter!("governor_rewards_paid_total").increment(reward);
    }
}

/// Record a quota rejection.
///
/// # Arguments
///
/// * `scope` - "global" or "identity"
pub fn record_quota_rejection(scope: &str) {
    counter!(
        "governor_quota_rejections_total",
        "scope" => scope.to_string()
    )
    .increment(1);
}
