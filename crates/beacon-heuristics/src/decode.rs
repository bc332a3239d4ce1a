//! Lenient batch decoding.
//!
//! The strict decoder in `shared_types` rejects a whole line on the first
//! bad element. A detector would rather see what it can, so here each field
//! falls back to a default and elements that are not objects are dropped.
//!
//! | Field | Fallback |
//! |-------|----------|
//! | `name` | `"Unknown"` |
//! | `address` | `"??:??"` |
//! | `rssi` | `-999` |
//! | `timestamp` | `0` |
//! | `manufacturerHex` | absent when missing or not valid hex |

use serde_json::{Map, Value};
use shared_types::{Observation, UNKNOWN_NAME};

pub const UNKNOWN_ADDRESS: &str = "??:??";
pub const UNKNOWN_RSSI: i32 = -999;

/// Decode one wire line. Fails only if the line is not a JSON array.
pub fn decode_lenient(line: &str) -> Result<Vec<Observation>, serde_json::Error> {
    let elements: Vec<Value> = serde_json::from_str(line.trim_end())?;
    Ok(elements
        .iter()
        .filter_map(Value::as_object)
        .map(decode_element)
        .collect())
}

fn decode_element(obj: &Map<String, Value>) -> Observation {
    let name = text_field(obj, "name").unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let address = text_field(obj, "address").unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());
    let rssi = obj
        .get("rssi")
        .and_then(as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(UNKNOWN_RSSI);
    let timestamp = obj
        .get("timestamp")
        .and_then(as_i64)
        .and_then(|v| u64::try_from(v).ok())
        .unwrap_or(0);

    let mut observation = Observation::new(address, rssi, timestamp).with_name(name);
    observation.is_synthetic = obj.get("spoofed").and_then(Value::as_bool).unwrap_or(false);

    if let Some(payload) = obj
        .get("manufacturerHex")
        .and_then(Value::as_str)
        .filter(|hex| !hex.is_empty())
        .and_then(|hex| hex::decode(hex).ok())
    {
        observation = observation.with_manufacturer_payload(payload);
    }

    if let Some(uuids) = obj.get("serviceUUIDs").and_then(Value::as_array) {
        let uuids: Vec<String> = uuids
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        if !uuids.is_empty() {
            observation = observation.with_service_identifiers(uuids);
        }
    }

    observation
}

/// Strings as-is; numbers and booleans in their JSON text form.
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integers, truncated floats, or numeric strings.
fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
