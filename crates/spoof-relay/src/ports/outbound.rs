//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the relay requires the host to provide: a sink for assembled
//! batches, a clock, a source of advertisements, and an optional observer
//! for per-cycle reporting.

use async_trait::async_trait;
use shared_types::{Advertisement, Batch};
use tokio::sync::mpsc;

use crate::domain::{CycleReport, IngestError, SessionSummary, TransportError};

/// Destination for assembled batches; one connected peer.
///
/// Any `Err` ends the session. Implementations must not retry internally.
#[async_trait]
pub trait BatchSink: Send {
    /// Serialize and write one batch.
    async fn send(&mut self, batch: &Batch) -> Result<usize, TransportError>;

    /// Human-readable peer description for logs.
    fn peer(&self) -> String;
}

/// Wall-clock source for observation timestamps.
///
/// Tests inject a fixed clock for deterministic assertions.
pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds.
    fn now_millis(&self) -> u64;
}

/// Counters reported by an advertisement source when it stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Advertisements forwarded to the store.
    pub accepted: u64,
    /// Input records dropped as malformed.
    pub rejected: u64,
}

/// Scanning collaborator: pushes raw advertisements into the relay.
///
/// `run` returns when the source is exhausted, or with
/// [`IngestError::ChannelClosed`] once the relay stops consuming.
#[async_trait]
pub trait AdvertisementSource: Send {
    async fn run(
        self: Box<Self>,
        tx: mpsc::Sender<Advertisement>,
    ) -> Result<IngestStats, IngestError>;
}

/// Receives cycle and session reports (logging, metrics).
pub trait CycleObserver: Send + Sync {
    fn on_cycle(&self, report: &CycleReport);

    fn on_session_end(&self, summary: &SessionSummary);
}
