//! # Driving Ports (API)
//!
//! What the runtime calls on the relay.

use async_trait::async_trait;

use crate::domain::{CycleReport, RelayError, SessionSummary};

/// Primary relay API for one connected session.
#[async_trait]
pub trait SpoofRelayApi: Send {
    /// Run a single cycle immediately: drain, assemble, send.
    ///
    /// Returns [`RelayError::TransportWriteFailure`] if the peer write fails;
    /// the session must not be driven further after that.
    async fn run_cycle(&mut self) -> Result<CycleReport, RelayError>;

    /// Run cycles on the configured interval until the transport fails.
    async fn run_session(&mut self) -> SessionSummary;
}
