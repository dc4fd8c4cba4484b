//! # Sentinel Telemetry
//!
//! Logging and metrics for the Sentinel host binary and tests.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter` and either a
//!   pretty or a JSON `fmt` layer
//! - **Metrics**: Prometheus counters for accepted calls, rejected calls and
//!   emitted events, exposed in text format by [`gather_metrics`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sentinel_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let _guard = init_telemetry(&config).expect("telemetry");
//!
//! sentinel_telemetry::record_call_accepted("evidence", "submit_evidence");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SENTINEL_SERVICE_NAME` | `sentinel` | Service name in log records |
//! | `SENTINEL_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `SENTINEL_JSON_LOGS` | `false` | JSON log lines |
//! | `SENTINEL_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `SENTINEL_METRICS` | `true` | Register Prometheus metrics |

#![warn(missing_docs)]

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    gather_metrics, record_call_accepted, record_call_rejected, record_event, register_metrics,
    MetricsHandle, CALLS_ACCEPTED, CALLS_REJECTED, EVENTS_EMITTED, REGISTRY,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The subscriber could not be installed.
    #[error("Failed to initialize tracing: {0}")]
    TracingInit(String),

    /// A metric could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Installs logging and, if enabled, registers metrics.
///
/// Hold the returned guard for the lifetime of the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = if config.metrics_enabled {
        Some(register_metrics()?)
    } else {
        None
    };

    init_tracing(config)?;

    tracing::info!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        metrics = config.metrics_enabled,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard { _metrics: metrics })
}

/// Keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: Option<MetricsHandle>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry");
    }
}
