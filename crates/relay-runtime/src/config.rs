//! # Runtime Configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then environment
//! variables, then command-line flags (applied by the CLI layer).
//!
//! ```toml
//! listen_addr = "127.0.0.1:9001"
//! mode = "demo"
//! feed = "/var/run/scanner.ndjson"
//!
//! [relay]
//! cycle_interval_ms = 15000
//! rotation_period = 4
//! spoof_count = 7
//! flood_count = 6000
//! service_id_strategy = "shared"
//! send_empty_batches = false
//! write_timeout_ms = 10000
//! manufacturer_key = 65535
//! ingest_channel_capacity = 1024
//! ```

use serde::{Deserialize, Serialize};
use shared_types::SpoofMode;
use spoof_relay::{ConfigError, RelayConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:9001";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum RuntimeConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("No spoof mode configured (use --mode, RELAY_MODE or `mode` in the config file)")]
    MissingMode,

    #[error(transparent)]
    Relay(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Address the relay listens on for its single client.
    pub listen_addr: String,
    /// Spoof mode. Required before the relay can start.
    pub mode: Option<SpoofMode>,
    /// Newline-delimited advertisement feed; stdin when unset.
    pub feed: Option<PathBuf>,
    /// Fixed RNG seed for reproducible generator output.
    pub seed: Option<u64>,
    pub relay: RelayConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            mode: None,
            feed: None,
            seed: None,
            relay: RelayConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load from an optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, RuntimeConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, RuntimeConfigError> {
        let content = fs::read_to_string(path).map_err(|source| RuntimeConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&content)?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, RuntimeConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `RELAY_LISTEN_ADDR`, `RELAY_MODE` and `RELAY_CYCLE_INTERVAL_SECS`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), RuntimeConfigError> {
        if let Some(addr) = lookup("RELAY_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Some(raw) = lookup("RELAY_MODE") {
            let mode = raw.parse().map_err(|_| RuntimeConfigError::InvalidEnv {
                var: "RELAY_MODE",
                value: raw.clone(),
            })?;
            self.mode = Some(mode);
        }
        if let Some(raw) = lookup("RELAY_CYCLE_INTERVAL_SECS") {
            self.relay.cycle_interval_ms =
                secs_to_millis(&raw).ok_or(RuntimeConfigError::InvalidEnv {
                    var: "RELAY_CYCLE_INTERVAL_SECS",
                    value: raw.clone(),
                })?;
        }
        Ok(())
    }

    /// Validate and return the mode to run with.
    pub fn resolve(&self) -> Result<SpoofMode, RuntimeConfigError> {
        self.relay.validate()?;
        self.mode.ok_or(RuntimeConfigError::MissingMode)
    }
}

/// Parse a non-negative, possibly fractional number of seconds.
pub fn secs_to_millis(raw: &str) -> Option<u64> {
    let secs: f64 = raw.trim().parse().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Some((secs * 1000.0).round() as u64)
}
