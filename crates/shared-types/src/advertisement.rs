//! # Advertisement
//!
//! Raw event delivered by a scanning collaborator, before it is reduced to
//! an [`Observation`](crate::Observation).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One received BLE advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advertisement {
    /// Device address as reported by the scanner.
    pub address: String,

    /// Advertised local name, if any.
    #[serde(default)]
    pub name: Option<String>,

    /// Received signal strength in dBm.
    pub rssi: i32,

    /// Manufacturer-specific data: company identifier → hex payload.
    ///
    /// Keys may be decimal (`"65535"`) or `0x`-prefixed hex (`"0xFFFF"`).
    #[serde(rename = "manufacturerData", default)]
    pub manufacturer_data: BTreeMap<String, String>,

    /// Advertised service UUIDs.
    #[serde(rename = "serviceUUIDs", default)]
    pub service_uuids: Vec<String>,
}

/// Parse a Bluetooth SIG company identifier from decimal or `0x` hex text.
pub fn parse_company_key(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    match raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
    {
        Some(hex_digits) => u16::from_str_radix(hex_digits, 16).ok(),
        None => raw.parse().ok(),
    }
}
