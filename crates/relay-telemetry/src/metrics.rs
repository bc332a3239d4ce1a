//! Prometheus metrics for the beacon relay.
//!
//! All metrics follow the naming convention: `beacon_relay_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Registry for every relay metric
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CYCLE METRICS
    // =========================================================================

    pub static ref CYCLES_TOTAL: Counter = Counter::new(
        "beacon_relay_cycles_total",
        "Total relay cycles executed"
    ).expect("metric creation failed");

    /// Cycles where nothing was available to relay
    pub static ref EMPTY_CYCLES: Counter = Counter::new(
        "beacon_relay_empty_cycles_total",
        "Cycles with no observations to relay"
    ).expect("metric creation failed");

    pub static ref BATCHES_SENT: Counter = Counter::new(
        "beacon_relay_batches_sent_total",
        "Batches written to the downstream peer"
    ).expect("metric creation failed");

    /// Records relayed, by origin
    pub static ref RECORDS_RELAYED: CounterVec = CounterVec::new(
        Opts::new("beacon_relay_records_relayed_total", "Records written downstream"),
        &["origin"]  // origin: genuine/synthetic
    ).expect("metric creation failed");

    pub static ref BATCH_RECORDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "beacon_relay_batch_records",
            "Records per sent batch"
        ).buckets(exponential_buckets(1.0, 4.0, 8).unwrap_or_default())
    ).expect("metric creation failed");

    pub static ref LAST_BATCH_BYTES: Gauge = Gauge::new(
        "beacon_relay_last_batch_bytes",
        "Size of the most recent batch line in bytes"
    ).expect("metric creation failed");

    // =========================================================================
    // INJECTION METRICS
    // =========================================================================

    pub static ref INJECTIONS: CounterVec = CounterVec::new(
        Opts::new("beacon_relay_injections_total", "Spoof injections performed"),
        &["strategy"]  // strategy: mac_randomization/uuid_spoofing/beacon_flooding
    ).expect("metric creation failed");

    /// Injections that were due but could not run (e.g. nothing to flood)
    pub static ref INJECTIONS_SKIPPED: CounterVec = CounterVec::new(
        Opts::new("beacon_relay_injections_skipped_total", "Due injections that were skipped"),
        &["strategy"]
    ).expect("metric creation failed");

    // =========================================================================
    // TRANSPORT METRICS
    // =========================================================================

    pub static ref WRITE_FAILURES: Counter = Counter::new(
        "beacon_relay_write_failures_total",
        "Writes to the downstream peer that ended a session"
    ).expect("metric creation failed");

    // =========================================================================
    // MONITOR METRICS
    // =========================================================================

    /// Detections raised by the monitor, by threat type
    pub static ref DETECTIONS: CounterVec = CounterVec::new(
        Opts::new("beacon_relay_monitor_detections_total", "Monitor detections"),
        &["threat"]
    ).expect("metric creation failed");
}

/// Handle to the registered metrics.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with [`REGISTRY`].
///
/// Safe to call more than once; metrics already registered are left alone.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Cycles
        Box::new(CYCLES_TOTAL.clone()),
        Box::new(EMPTY_CYCLES.clone()),
        Box::new(BATCHES_SENT.clone()),
        Box::new(RECORDS_RELAYED.clone()),
        Box::new(BATCH_RECORDS.clone()),
        Box::new(LAST_BATCH_BYTES.clone()),
        // Injection
        Box::new(INJECTIONS.clone()),
        Box::new(INJECTIONS_SKIPPED.clone()),
        // Transport
        Box::new(WRITE_FAILURES.clone()),
        // Monitor
        Box::new(DETECTIONS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
