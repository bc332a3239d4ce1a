//! # Beacon Relay Runtime
//!
//! Composition root for the `beacon-relay` binary.
//!
//! ## Modules
//!
//! - `cli/` - command-line flags (clap)
//! - `config/` - layered runtime configuration (TOML, env, flags)
//! - `relay/` - binds the endpoint and wires store, ingestion and cycle loop
//! - `monitor/` - client that runs the heuristics over a relay's output
//! - `metrics_observer/` - Prometheus-backed cycle observer
//!
//! ## Startup Sequence
//!
//! 1. Parse flags
//! 2. Initialize telemetry (logs, metrics)
//! 3. Load configuration: file → environment → flags
//! 4. Bind, accept one client, relay until the client goes away

pub mod cli;
pub mod config;
pub mod metrics_observer;
pub mod monitor;
pub mod relay;

pub use config::{RuntimeConfig, RuntimeConfigError};
pub use metrics_observer::PrometheusObserver;
pub use monitor::{run_monitor, ReportFormat};
pub use relay::{feed_source, RelayRuntime};
