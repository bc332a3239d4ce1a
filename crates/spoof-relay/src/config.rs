//! Configuration for the spoof relay pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::{ConfigError, ServiceIdStrategy};

/// Company identifier whose payload becomes `manufacturerHex`.
pub const DEFAULT_MANUFACTURER_KEY: u16 = 0xFFFF;

/// Relay pipeline configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Time between cycles, in milliseconds.
    pub cycle_interval_ms: u64,
    /// Cycles between injections (and between demo strategy switches).
    pub rotation_period: u64,
    /// Synthetic devices per randomization injection.
    pub spoof_count: usize,
    /// Replays per beacon-flood injection.
    pub flood_count: usize,
    /// How spoofed records pick their service UUID.
    pub service_id_strategy: ServiceIdStrategy,
    /// Write `[]` on cycles with nothing to relay instead of staying silent.
    pub send_empty_batches: bool,
    /// Upper bound on a single batch write, in milliseconds.
    pub write_timeout_ms: u64,
    /// Designated manufacturer key for `manufacturerHex`.
    pub manufacturer_key: u16,
    /// Capacity of the scanner → store channel.
    pub ingest_channel_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            cycle_interval_ms: 15_000,
            rotation_period: 4,
            spoof_count: 7,
            flood_count: 6000,
            service_id_strategy: ServiceIdStrategy::Shared,
            send_empty_batches: false,
            write_timeout_ms: 10_000,
            manufacturer_key: DEFAULT_MANUFACTURER_KEY,
            ingest_channel_capacity: 1024,
        }
    }
}

impl RelayConfig {
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_millis(self.cycle_interval_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_interval_ms == 0 {
            return Err(ConfigError::ZeroCycleInterval);
        }
        if self.rotation_period == 0 {
            return Err(ConfigError::ZeroRotationPeriod);
        }
        if self.write_timeout_ms == 0 {
            return Err(ConfigError::ZeroWriteTimeout);
        }
        if self.ingest_channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        Ok(())
    }
}
