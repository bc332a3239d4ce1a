//! Domain layer: pure pipeline logic, no I/O.

pub mod assembler;
pub mod errors;
pub mod generators;
pub mod report;
pub mod scheduler;
pub mod store;

pub use assembler::{AssembledBatch, BatchAssembler, InjectionOutcome};
pub use errors::{ConfigError, IngestError, InjectionError, RelayError, TransportError};
pub use generators::{
    beacon_flood, randomize_identities, spoof_service_identifiers, synthetic_address,
    ServiceIdStrategy, SPOOF_DEVICE_NAME, SPOOF_MANUFACTURER_PAYLOAD, SPOOF_SERVICE_UUID,
};
pub use report::{CycleReport, SessionSummary};
pub use scheduler::{CycleScheduler, CycleTick};
pub use store::ObservationStore;
