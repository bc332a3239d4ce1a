//! Per-cycle and per-session reports handed to observers.

use shared_types::SpoofMode;

use super::assembler::InjectionOutcome;
use super::errors::TransportError;

/// Summary of one completed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub cycle: u64,
    /// Strategy in effect, `None` only before demo mode's first rotation.
    pub strategy: Option<SpoofMode>,
    /// Set on the cycle where demo mode switched strategy.
    pub switched_to: Option<SpoofMode>,
    pub genuine: usize,
    pub synthetic: usize,
    pub injection: InjectionOutcome,
    /// Whether a line was written to the peer.
    pub sent: bool,
    /// Bytes written, zero when nothing was sent.
    pub bytes: usize,
}

impl CycleReport {
    pub fn total(&self) -> usize {
        self.genuine + self.synthetic
    }
}

/// How a session ended.
#[derive(Debug)]
pub struct SessionSummary {
    pub cycles: u64,
    pub batches_sent: u64,
    pub records_sent: u64,
    /// The write failure that terminated the session.
    pub termination: TransportError,
}
