//! # Spoof Generators
//!
//! Pure functions producing synthetic observation batches. The only
//! non-determinism is the caller-supplied RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};
use shared_types::Observation;

use super::errors::InjectionError;

/// Display name carried by every generated device.
pub const SPOOF_DEVICE_NAME: &str = "SpoofedDevice";

/// Sentinel manufacturer payload (`deadbeef33445566778899aabbccddeeff112233`).
pub const SPOOF_MANUFACTURER_PAYLOAD: [u8; 20] = [
    0xde, 0xad, 0xbe, 0xef, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
    0xee, 0xff, 0x11, 0x22, 0x33,
];

/// Service UUID advertised by spoofed devices under the shared strategy.
pub const SPOOF_SERVICE_UUID: &str = "f000aaaa-0451-4000-b000-000000000000";

/// Generated RSSI range, dBm.
const SPOOF_RSSI_MIN: i32 = -90;
const SPOOF_RSSI_MAX: i32 = -40;

/// How service-identifier spoofing assigns UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceIdStrategy {
    /// Every spoofed record advertises [`SPOOF_SERVICE_UUID`].
    #[default]
    Shared,
    /// Each spoofed record advertises its own random v4 UUID.
    PerRecord,
}

/// Address of the `index`-th synthetic device: `02:11:22:33:HH:LL`.
///
/// The leading `02` octet marks a locally administered address. Past
/// index 65 535 the high field widens instead of wrapping, so addresses
/// stay unique for any count.
pub fn synthetic_address(index: usize) -> String {
    format!("02:11:22:33:{:02X}:{:02X}", index / 256, index % 256)
}

fn synthetic_device<R: Rng + ?Sized>(index: usize, now_millis: u64, rng: &mut R) -> Observation {
    Observation::new(
        synthetic_address(index),
        rng.gen_range(SPOOF_RSSI_MIN..=SPOOF_RSSI_MAX),
        now_millis,
    )
    .with_name(SPOOF_DEVICE_NAME)
    .synthetic()
}

/// `count` devices with sequential fake addresses and the sentinel payload.
pub fn randomize_identities<R: Rng + ?Sized>(
    count: usize,
    now_millis: u64,
    rng: &mut R,
) -> Vec<Observation> {
    (0..count)
        .map(|i| {
            synthetic_device(i, now_millis, rng)
                .with_manufacturer_payload(SPOOF_MANUFACTURER_PAYLOAD.to_vec())
        })
        .collect()
}

/// `count` devices with sequential fake addresses advertising spoofed UUIDs.
pub fn spoof_service_identifiers<R: Rng + ?Sized>(
    count: usize,
    now_millis: u64,
    strategy: ServiceIdStrategy,
    rng: &mut R,
) -> Vec<Observation> {
    (0..count)
        .map(|i| {
            let uuid = match strategy {
                ServiceIdStrategy::Shared => SPOOF_SERVICE_UUID.to_string(),
                ServiceIdStrategy::PerRecord => {
                    uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
                }
            };
            synthetic_device(i, now_millis, rng).with_service_identifiers(vec![uuid])
        })
        .collect()
}

/// Replay `source` `flood_count` times with timestamps `now, now+1, ...`.
///
/// Every other field of the source is preserved.
pub fn beacon_flood(
    source: Option<&Observation>,
    flood_count: usize,
    now_millis: u64,
) -> Result<Vec<Observation>, InjectionError> {
    let source = source.ok_or(InjectionError::EmptyFloodSource)?;

    Ok((0..flood_count as u64)
        .map(|i| {
            let mut clone = source.clone();
            clone.timestamp_millis = now_millis + i;
            clone.is_synthetic = true;
            clone
        })
        .collect())
}
