//! Ingestion task: scanner channel → observation store.
//!
//! Each advertisement is reduced to an observation stamped with the relay
//! clock and upserted by address. Runs until every sender is dropped.

use shared_types::{Advertisement, Observation};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::config::RelayConfig;
use crate::domain::ObservationStore;
use crate::ports::Clock;

pub struct Ingestor {
    store: Arc<ObservationStore>,
    clock: Arc<dyn Clock>,
    manufacturer_key: u16,
}

impl Ingestor {
    pub fn new(store: Arc<ObservationStore>, clock: Arc<dyn Clock>, manufacturer_key: u16) -> Self {
        Self {
            store,
            clock,
            manufacturer_key,
        }
    }

    pub fn from_config(
        store: Arc<ObservationStore>,
        clock: Arc<dyn Clock>,
        config: &RelayConfig,
    ) -> Self {
        Self::new(store, clock, config.manufacturer_key)
    }

    /// Record one advertisement.
    pub fn ingest(&self, adv: Advertisement) {
        let observation =
            Observation::from_advertisement(adv, self.manufacturer_key, self.clock.now_millis());
        trace!(
            address = %observation.identity,
            rssi = observation.signal_strength,
            "Recorded advertisement"
        );
        self.store.record(observation);
    }

    /// Drain the channel until it closes. Returns the number recorded.
    pub async fn run(self, mut rx: mpsc::Receiver<Advertisement>) -> u64 {
        let mut recorded = 0u64;
        while let Some(adv) = rx.recv().await {
            self.ingest(adv);
            recorded += 1;
        }
        debug!(recorded, "Ingestion channel closed");
        recorded
    }
}
