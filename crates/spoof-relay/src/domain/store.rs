//! # Observation Store
//!
//! Latest observation per device address for the current cycle window.
//!
//! Two operations only: `record` (scanner side) and `drain_all` (cycle side).
//! Both take the same short-lived lock; `drain_all` swaps the whole map out,
//! so a concurrent `record` lands either entirely in this drain or entirely
//! in the next one.

use parking_lot::Mutex;
use shared_types::Observation;
use std::collections::HashMap;

/// Mutex-guarded map of identity → most recent observation.
#[derive(Debug, Default)]
pub struct ObservationStore {
    entries: Mutex<HashMap<String, Observation>>,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert by identity. Last write wins.
    pub fn record(&self, observation: Observation) {
        self.entries
            .lock()
            .insert(observation.identity.clone(), observation);
    }

    /// Take every stored observation and leave the store empty.
    ///
    /// Output order is unspecified.
    pub fn drain_all(&self) -> Vec<Observation> {
        let drained = std::mem::take(&mut *self.entries.lock());
        drained.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
