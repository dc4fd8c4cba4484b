//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log record
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or full
    /// `EnvFilter` syntax)
    pub log_level: String,

    /// Whether to write logs to stderr at all
    pub console_output: bool,

    /// Whether to emit JSON log lines instead of pretty text
    pub json_logs: bool,

    /// Whether to register Prometheus metrics
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "sentinel".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

fn flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SENTINEL_SERVICE_NAME`: Service name (default: sentinel)
    /// - `SENTINEL_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SENTINEL_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SENTINEL_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `SENTINEL_METRICS`: Register metrics (default: true)
    ///
    /// Unparseable flags keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag_or = |name: &str, default: bool| {
            lookup(name).as_deref().and_then(flag).unwrap_or(default)
        };

        Self {
            service_name: lookup("SENTINEL_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: lookup("SENTINEL_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            console_output: flag_or("SENTINEL_CONSOLE_OUTPUT", defaults.console_output),
            json_logs: flag_or("SENTINEL_JSON_LOGS", defaults.json_logs),
            metrics_enabled: flag_or("SENTINEL_METRICS", defaults.metrics_enabled),
        }
    }
}
