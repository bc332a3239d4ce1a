//! Loopback integration flows and their fixtures.

pub mod monitor_flow;
pub mod session_flow;

use async_trait::async_trait;
use relay_runtime::{RelayRuntime, RuntimeConfig};
use shared_types::{Advertisement, SpoofMode};
use spoof_relay::{AdvertisementSource, IngestError, IngestStats, RelayConfig, SessionSummary};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Scanner stand-in that re-advertises a fixed set of devices on a period
/// until the relay stops consuming.
pub struct RepeatingSource {
    advertisements: Vec<Advertisement>,
    period: Duration,
}

impl RepeatingSource {
    pub fn new(advertisements: Vec<Advertisement>, period: Duration) -> Self {
        Self {
            advertisements,
            period,
        }
    }
}

#[async_trait]
impl AdvertisementSource for RepeatingSource {
    async fn run(
        self: Box<Self>,
        tx: mpsc::Sender<Advertisement>,
    ) -> Result<IngestStats, IngestError> {
        let mut stats = IngestStats::default();
        loop {
            for adv in &self.advertisements {
                tx.send(adv.clone())
                    .await
                    .map_err(|_| IngestError::ChannelClosed)?;
                stats.accepted += 1;
            }
            tokio::time::sleep(self.period).await;
        }
    }
}

/// Advertisement carrying `payload_hex` under the designated 0xFFFF key and
/// an unrelated vendor entry that must not reach the wire.
pub fn advertisement(address: &str, rssi: i32, payload_hex: &str) -> Advertisement {
    let mut manufacturer_data = BTreeMap::new();
    manufacturer_data.insert("0xFFFF".to_string(), payload_hex.to_string());
    manufacturer_data.insert("76".to_string(), "0215".to_string());
    Advertisement {
        address: address.to_string(),
        name: Some("Tag".to_string()),
        rssi,
        manufacturer_data,
        service_uuids: vec!["0000180f-0000-1000-8000-00805f9b34fb".to_string()],
    }
}

/// Loopback config on an ephemeral port with a fast cycle.
pub fn loopback_config(
    mode: SpoofMode,
    cycle_interval_ms: u64,
    rotation_period: u64,
) -> RuntimeConfig {
    RuntimeConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        mode: Some(mode),
        feed: None,
        seed: Some(7),
        relay: RelayConfig {
            cycle_interval_ms,
            rotation_period,
            write_timeout_ms: 2_000,
            ..RelayConfig::default()
        },
    }
}

/// Bind a relay and start serving `source` in the background.
pub async fn start_relay(
    config: RuntimeConfig,
    source: Box<dyn AdvertisementSource>,
) -> (
    SocketAddr,
    JoinHandle<anyhow::Result<SessionSummary>>,
) {
    let runtime = RelayRuntime::bind(config).await.expect("relay binds");
    let addr = runtime.local_addr();
    let handle = tokio::spawn(runtime.run(source));
    (addr, handle)
}
