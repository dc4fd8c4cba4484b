//! Node configuration.
//!
//! Values come from the environment first and are then overridden by
//! command-line flags.

use std::env;
use std::path::PathBuf;

use clap::Parser;
use sentinel_registry::domain::entities::ResourceLimits;
use sentinel_registry::service::ServiceConfig;
use sentinel_telemetry::TelemetryConfig;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds an unparseable number.
    #[error("{var}={value:?} is not a valid size")]
    InvalidSize {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// A limit was set to zero.
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

/// Command-line flags.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "sentinel-node")]
#[command(about = "Replay a call script against the Sentinel evidence, incident and profile programs")]
pub struct Cli {
    /// JSON call script to replay (built-in demo script if omitted)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Log filter, overrides SENTINEL_LOG_LEVEL / RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub metrics: bool,

    /// Maximum storage key length in bytes
    #[arg(long)]
    pub max_key_len: Option<usize>,

    /// Maximum stored value length in bytes
    #[arg(long)]
    pub max_value_len: Option<usize>,

    /// Maximum number of call arguments
    #[arg(long)]
    pub max_args: Option<usize>,

    /// Maximum combined call argument length in bytes
    #[arg(long)]
    pub max_args_len: Option<usize>,
}

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Logging and metrics.
    pub telemetry: TelemetryConfig,
    /// Per-call resource budget.
    pub limits: ResourceLimits,
    /// Script to replay.
    pub script: Option<PathBuf>,
    /// Whether to print metrics after the run.
    pub print_metrics: bool,
}

impl NodeConfig {
    /// Builds the configuration from the process environment and `cli`.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_sources(|name| env::var(name).ok(), cli)
    }

    /// Builds the configuration from a variable lookup and `cli`.
    pub fn from_sources(
        lookup: impl Fn(&str) -> Option<String>,
        cli: &Cli,
    ) -> Result<Self, ConfigError> {
        let mut telemetry = TelemetryConfig::from_lookup(&lookup);
        if let Some(level) = &cli.log_level {
            telemetry.log_level.clone_from(level);
        }
        if cli.json_logs {
            telemetry.json_logs = true;
        }
        if cli.metrics {
            telemetry.metrics_enabled = true;
        }

        let mut limits = limits_from_lookup(&lookup)?;
        override_limit(&mut limits.max_key_len, cli.max_key_len);
        override_limit(&mut limits.max_value_len, cli.max_value_len);
        override_limit(&mut limits.max_args, cli.max_args);
        override_limit(&mut limits.max_args_total_len, cli.max_args_len);
        validate_limits(&limits)?;

        Ok(Self {
            telemetry,
            limits,
            script: cli.script.clone(),
            print_metrics: cli.metrics,
        })
    }

    /// Registry service configuration derived from this node configuration.
    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            limits: self.limits.clone(),
        }
    }
}

fn override_limit(slot: &mut usize, value: Option<usize>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Reads [`ResourceLimits`] from `SENTINEL_MAX_KEY_LEN`,
/// `SENTINEL_MAX_VALUE_LEN`, `SENTINEL_MAX_ARGS` and `SENTINEL_MAX_ARGS_LEN`.
/// Unset variables keep their defaults.
pub fn limits_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ResourceLimits, ConfigError> {
    let size = |var: &'static str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidSize { var, value }),
        }
    };

    Ok(ResourceLimits {
        max_key_len: size("SENTINEL_MAX_KEY_LEN", ResourceLimits::DEFAULT_MAX_KEY_LEN)?,
        max_value_len: size("SENTINEL_MAX_VALUE_LEN", ResourceLimits::DEFAULT_MAX_VALUE_LEN)?,
        max_args: size("SENTINEL_MAX_ARGS", ResourceLimits::DEFAULT_MAX_ARGS)?,
        max_args_total_len: size(
            "SENTINEL_MAX_ARGS_LEN",
            ResourceLimits::DEFAULT_MAX_ARGS_TOTAL_LEN,
        )?,
    })
}

fn validate_limits(limits: &ResourceLimits) -> Result<(), ConfigError> {
    let checks = [
        ("max_key_len", limits.max_key_len),
        ("max_value_len", limits.max_value_len),
        ("max_args", limits.max_args),
        ("max_args_total_len", limits.max_args_total_len),
    ];
    match checks.iter().find(|(_, value)| *value == 0) {
        Some((name, _)) => Err(ConfigError::ZeroLimit(name)),
        None => Ok(()),
    }
}
