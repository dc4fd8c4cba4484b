//! Prometheus metrics for the Sentinel registry.
//!
//! All metrics follow the naming convention: `sentinel_<metric>_total`.
//! Every metric is a counter; labels carry the record family, operation,
//! rejection reason or event tag.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Calls committed, by family and operation
    pub static ref CALLS_ACCEPTED: IntCounterVec = IntCounterVec::new(
        Opts::new("sentinel_calls_accepted_total", "Calls committed by the ledger"),
        &["family", "operation"]
    ).expect("metric creation failed");

    /// Calls rolled back, by family and rejection reason
    pub static ref CALLS_REJECTED: IntCounterVec = IntCounterVec::new(
        Opts::new("sentinel_calls_rejected_total", "Calls rejected and rolled back"),
        &["family", "reason"]
    ).expect("metric creation failed");

    /// Events committed, by tag
    pub static ref EVENTS_EMITTED: IntCounterVec = IntCounterVec::new(
        Opts::new("sentinel_events_emitted_total", "Events committed to the ledger log"),
        &["tag"]
    ).expect("metric creation failed");
}

/// Proof that the metrics are registered.
#[derive(Debug)]
pub struct MetricsHandle {
    _private: (),
}

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CALLS_ACCEPTED.clone()),
        Box::new(CALLS_REJECTED.clone()),
        Box::new(EVENTS_EMITTED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _private: () })
}

/// Counts a committed call.
pub fn record_call_accepted(family: &str, operation: &str) {
    CALLS_ACCEPTED.with_label_values(&[family, operation]).inc();
}

/// Counts a rejected call.
pub fn record_call_rejected(family: &str, reason: &str) {
    CALLS_REJECTED.with_label_values(&[family, reason]).inc();
}

/// Counts a committed event.
pub fn record_event(tag: &str) {
    EVENTS_EMITTED.with_label_values(&[tag]).inc();
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
