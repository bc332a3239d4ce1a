//! Command-line interface.

use clap::{Args, Parser, Subcommand};
use shared_types::SpoofMode;
use spoof_relay::ServiceIdStrategy;
use std::path::PathBuf;

use crate::config::RuntimeConfig;

/// BLE beacon relay with spoof injection
#[derive(Parser, Debug)]
#[command(name = "beacon-relay", version)]
#[command(about = "Relay BLE beacon observations to one client, injecting spoofed records")]
pub struct Cli {
    /// Log filter (overrides RELAY_LOG_LEVEL / RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the relay for a single downstream client
    Relay(RelayArgs),
    /// Connect to a relay and report spoofing detections
    Monitor(MonitorArgs),
}

#[derive(Args, Debug, Default)]
pub struct RelayArgs {
    /// Spoofing mode: mac_randomization, uuid_spoofing, beacon_flooding or demo
    #[arg(short, long)]
    pub mode: Option<SpoofMode>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Newline-delimited JSON advertisement feed (default: stdin)
    #[arg(short, long)]
    pub feed: Option<PathBuf>,

    /// Seconds between batches
    #[arg(long)]
    pub interval_secs: Option<f64>,

    /// Cycles between injections
    #[arg(long)]
    pub rotation_period: Option<u64>,

    /// Spoofed devices per injection
    #[arg(long)]
    pub spoof_count: Option<usize>,

    /// Replays per beacon flood
    #[arg(long)]
    pub flood_count: Option<usize>,

    /// Write `[]` on cycles with nothing to relay
    #[arg(long)]
    pub send_empty: bool,

    /// Give every spoofed record its own service UUID
    #[arg(long)]
    pub per_record_uuids: bool,

    /// Fixed RNG seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RelayArgs {
    /// Apply flags on top of file and environment configuration.
    pub fn apply(&self, config: &mut RuntimeConfig) {
        if let Some(mode) = self.mode {
            config.mode = Some(mode);
        }
        if let Some(listen) = &self.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(feed) = &self.feed {
            config.feed = Some(feed.clone());
        }
        if let Some(secs) = self.interval_secs {
            if secs.is_finite() && secs >= 0.0 {
                config.relay.cycle_interval_ms = (secs * 1000.0).round() as u64;
            }
        }
        if let Some(period) = self.rotation_period {
            config.relay.rotation_period = period;
        }
        if let Some(count) = self.spoof_count {
            config.relay.spoof_count = count;
        }
        if let Some(count) = self.flood_count {
            config.relay.flood_count = count;
        }
        if self.send_empty {
            config.relay.send_empty_batches = true;
        }
        if self.per_record_uuids {
            config.relay.service_id_strategy = ServiceIdStrategy::PerRecord;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Relay address
    #[arg(short, long, default_value = crate::config::DEFAULT_LISTEN_ADDR)]
    pub addr: String,

    /// Trusted address, never reported (repeatable)
    #[arg(short, long = "trust")]
    pub trusted: Vec<String>,

    /// Print one JSON report per batch
    #[arg(long)]
    pub json: bool,
}
