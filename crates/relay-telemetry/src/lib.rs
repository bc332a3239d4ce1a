//! # Relay Telemetry
//!
//! Logging and metrics for the beacon relay binaries.
//!
//! - **Logs**: `tracing-subscriber` with an `EnvFilter` and either a pretty
//!   or a JSON `fmt` layer.
//! - **Metrics**: Prometheus counters and gauges in a crate-local registry,
//!   rendered with [`encode_metrics`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RELAY_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `RELAY_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `RELAY_CONSOLE_OUTPUT` | `true` | Write logs to stderr at all |
//! | `RELAY_SERVICE_NAME` | `beacon-relay` | Service name in startup logs |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, BATCHES_SENT, BATCH_RECORDS, CYCLES_TOTAL,
    DETECTIONS, EMPTY_CYCLES, INJECTIONS, INJECTIONS_SKIPPED, LAST_BATCH_BYTES, RECORDS_RELAYED,
    WRITE_FAILURES,
};
pub use tracing_setup::{init_tracing, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and metrics.
///
/// Hold the returned guard for the life of the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    let tracing = init_tracing(&config)?;
    Ok(TelemetryGuard {
        _tracing: tracing,
        _metrics: metrics,
    })
}

/// Keeps telemetry active until dropped.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        match encode_metrics() {
            Ok(text) => tracing::debug!(metrics = %text, "Final metrics snapshot"),
            Err(e) => tracing::warn!(error = %e, "Could not encode final metrics"),
        }
    }
}

/// Increment a counter, optionally by label values.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
