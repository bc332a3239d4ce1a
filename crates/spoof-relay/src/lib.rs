//! # Spoof Relay
//!
//! Batch-aggregation and spoof-injection pipeline for relaying BLE beacon
//! observations to a single downstream consumer.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - **Domain Layer:** observation store, spoof generators, cycle scheduler,
//!   batch assembler. No I/O.
//! - **Ports Layer:** `SpoofRelayApi` (driving) and `BatchSink`, `Clock`,
//!   `AdvertisementSource`, `CycleObserver` (driven).
//! - **Service Layer:** `RelayService` runs one session's cycle loop.
//! - **Adapters Layer:** TCP session transport, newline-JSON advertisement
//!   feed, ingestion task, system clock, logging observer.
//!
//! ## Cycle
//!
//! ```text
//! scanner ──Advertisement──→ mpsc ──→ Ingestor ──record()──→ ObservationStore
//!                                                                  │
//!                          every cycle_interval: drain_all() ←─────┘
//!                                  │
//!                          CycleScheduler.advance()
//!                                  │
//!                          BatchAssembler.assemble()  (+ generator output)
//!                                  │
//!                          BatchSink.send()  ──error──→ session ends
//! ```
//!
//! ## Example
//!
//! ```rust
//! use spoof_relay::{CycleScheduler, ObservationStore};
//! use shared_types::{Observation, SpoofMode};
//!
//! let store = ObservationStore::new();
//! store.record(Observation::new("AA:BB:CC:DD:EE:FF", -60, 1));
//! store.record(Observation::new("AA:BB:CC:DD:EE:FF", -55, 2));
//! assert_eq!(store.drain_all().len(), 1);
//!
//! let mut scheduler = CycleScheduler::new(SpoofMode::Demo, 4);
//! let first = scheduler.advance();
//! assert_eq!(first.strategy, Some(SpoofMode::IdentityRandomization));
//! assert!(!first.injection_due);
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

/// Test utilities (FixedClock, RecordingSink).
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::RelayConfig;
pub use domain::{
    beacon_flood, randomize_identities, spoof_service_identifiers, synthetic_address,
    AssembledBatch, BatchAssembler, ConfigError, CycleReport, CycleScheduler, CycleTick,
    IngestError, InjectionError, InjectionOutcome, ObservationStore, RelayError,
    ServiceIdStrategy, SessionSummary, TransportError, SPOOF_DEVICE_NAME,
    SPOOF_MANUFACTURER_PAYLOAD, SPOOF_SERVICE_UUID,
};
pub use ports::{
    AdvertisementSource, BatchSink, Clock, CycleObserver, IngestStats, SpoofRelayApi,
};
pub use service::RelayService;
