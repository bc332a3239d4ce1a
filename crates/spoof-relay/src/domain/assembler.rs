//! # Batch Assembler
//!
//! Merges the drained genuine observations with zero or one generator's
//! output, according to the cycle's tick.

use rand::seq::SliceRandom;
use rand::Rng;
use shared_types::{Batch, Observation, SpoofMode};

use super::errors::InjectionError;
use super::generators::{
    beacon_flood, randomize_identities, spoof_service_identifiers, ServiceIdStrategy,
};
use super::scheduler::CycleTick;
use crate::config::RelayConfig;

/// What happened to injection on a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionOutcome {
    /// Not an injection cycle, or no injecting strategy active.
    NotDue,
    /// Synthetic records were appended.
    Injected {
        strategy: SpoofMode,
        count: usize,
        /// Address replayed by a beacon flood.
        flood_source: Option<String>,
    },
    /// Injection was due but could not run.
    Skipped {
        strategy: SpoofMode,
        reason: InjectionError,
    },
}

impl InjectionOutcome {
    /// Number of synthetic records added.
    pub fn injected_count(&self) -> usize {
        match self {
            Self::Injected { count, .. } => *count,
            _ => 0,
        }
    }
}

/// One cycle's batch plus how it was built.
#[derive(Debug, Clone)]
pub struct AssembledBatch {
    pub batch: Batch,
    pub injection: InjectionOutcome,
}

/// Applies the injection rules to a cycle's genuine observations.
#[derive(Debug, Clone)]
pub struct BatchAssembler {
    spoof_count: usize,
    flood_count: usize,
    service_id_strategy: ServiceIdStrategy,
}

impl BatchAssembler {
    pub fn new(
        spoof_count: usize,
        flood_count: usize,
        service_id_strategy: ServiceIdStrategy,
    ) -> Self {
        Self {
            spoof_count,
            flood_count,
            service_id_strategy,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(
            config.spoof_count,
            config.flood_count,
            config.service_id_strategy,
        )
    }

    /// Build the batch for `tick` from `genuine`.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        genuine: Vec<Observation>,
        tick: &CycleTick,
        now_millis: u64,
        rng: &mut R,
    ) -> AssembledBatch {
        let strategy = match tick.strategy {
            Some(strategy) if tick.injection_due && strategy.injects() => strategy,
            _ => {
                return AssembledBatch {
                    batch: Batch::new(genuine),
                    injection: InjectionOutcome::NotDue,
                }
            }
        };

        let mut batch = Batch::new(genuine);
        let (synthetic, flood_source) = match strategy {
            SpoofMode::IdentityRandomization => {
                (Ok(randomize_identities(self.spoof_count, now_millis, rng)), None)
            }
            SpoofMode::ServiceIdentifierSpoofing => (
                Ok(spoof_service_identifiers(
                    self.spoof_count,
                    now_millis,
                    self.service_id_strategy,
                    rng,
                )),
                None,
            ),
            SpoofMode::BeaconFlooding => {
                let source = batch.genuine().choose(rng).cloned();
                let address = source.as_ref().map(|s| s.identity.clone());
                (beacon_flood(source.as_ref(), self.flood_count, now_millis), address)
            }
            SpoofMode::Demo => {
                return AssembledBatch {
                    batch,
                    injection: InjectionOutcome::NotDue,
                }
            }
        };

        let injection = match synthetic {
            Ok(records) => {
                let count = records.len();
                batch.extend_synthetic(records);
                InjectionOutcome::Injected {
                    strategy,
                    count,
                    flood_source,
                }
            }
            Err(reason) => InjectionOutcome::Skipped { strategy, reason },
        };

        AssembledBatch { batch, injection }
    }
}
