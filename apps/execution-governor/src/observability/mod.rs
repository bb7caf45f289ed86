//! Observability module for metrics and logging.

mod logging;
mod metrics;

pub use logging::{TracingError, build_env_filter, init_tracing};
pub use self::metrics::{
    MetricsConfig, MetricsError, init_metrics, record_execution, record_quota_rejection,
    record_settlement,
};
