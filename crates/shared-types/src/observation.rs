//! # Observation
//!
//! One beacon sighting as relayed downstream. The serde layout of this type
//! *is* the wire format, so field renames here are protocol changes.

use serde::{Deserialize, Serialize};

use crate::advertisement::{parse_company_key, Advertisement};

/// Display name used when the scanner reports none.
pub const UNKNOWN_NAME: &str = "Unknown";

fn default_name() -> String {
    UNKNOWN_NAME.to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single beacon sighting, keyed by device address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Advertised local name, `"Unknown"` when absent.
    #[serde(rename = "name", default = "default_name")]
    pub display_name: String,

    /// Device address; the dedup key within a cycle.
    #[serde(rename = "address")]
    pub identity: String,

    /// Received signal strength in dBm.
    #[serde(rename = "rssi")]
    pub signal_strength: i32,

    /// Capture time in epoch milliseconds.
    #[serde(rename = "timestamp")]
    pub timestamp_millis: u64,

    /// Set only on generator output. Omitted on the wire when false.
    #[serde(rename = "spoofed", default, skip_serializing_if = "is_false")]
    pub is_synthetic: bool,

    /// Payload under the designated manufacturer key.
    #[serde(
        rename = "manufacturerHex",
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::hex_payload"
    )]
    pub manufacturer_payload: Option<Vec<u8>>,

    /// Advertised service UUIDs, in scanner order.
    #[serde(
        rename = "serviceUUIDs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_identifiers: Option<Vec<String>>,
}

impl Observation {
    /// Create a genuine observation with no name or optional fields.
    pub fn new(identity: impl Into<String>, signal_strength: i32, timestamp_millis: u64) -> Self {
        Self {
            display_name: default_name(),
            identity: identity.into(),
            signal_strength,
            timestamp_millis,
            is_synthetic: false,
            manufacturer_payload: None,
            service_identifiers: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_manufacturer_payload(mut self, payload: Vec<u8>) -> Self {
        self.manufacturer_payload = Some(payload);
        self
    }

    pub fn with_service_identifiers(mut self, ids: Vec<String>) -> Self {
        self.service_identifiers = Some(ids);
        self
    }

    /// Mark this record as generator output.
    pub fn synthetic(mut self) -> Self {
        self.is_synthetic = true;
        self
    }

    /// Build an observation from a raw scanner event.
    ///
    /// Only the payload stored under `manufacturer_key` is kept; other
    /// manufacturer entries are ignored. Unparseable keys or hex payloads are
    /// dropped rather than failing the whole record. An empty service list is
    /// treated as absent.
    pub fn from_advertisement(adv: Advertisement, manufacturer_key: u16, now_millis: u64) -> Self {
        let manufacturer_payload = adv
            .manufacturer_data
            .iter()
            .find(|(key, _)| parse_company_key(key) == Some(manufacturer_key))
            .and_then(|(_, payload)| match hex::decode(payload) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::debug!(
                        address = %adv.address,
                        error = %e,
                        "Dropping undecodable manufacturer payload"
                    );
                    None
                }
            });

        let service_identifiers = if adv.service_uuids.is_empty() {
            None
        } else {
            Some(adv.service_uuids)
        };

        Self {
            display_name: adv
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(default_name),
            identity: adv.address,
            signal_strength: adv.rssi,
            timestamp_millis: now_millis,
            is_synthetic: false,
            manufacturer_payload,
            service_identifiers,
        }
    }
}
