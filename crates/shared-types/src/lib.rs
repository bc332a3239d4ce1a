//! # Shared Types Crate
//!
//! Domain entities and the wire format shared by the spoof relay and any
//! downstream consumer (the heuristics monitor, integration tests).
//!
//! ## Contents
//!
//! - **Observation**: one deduplicated beacon sighting, genuine or synthetic.
//! - **Advertisement**: the raw event delivered by a scanning collaborator.
//! - **Batch**: the ordered set of observations relayed for one cycle.
//! - **SpoofMode**: the injection strategy selected for a session.
//!
//! ## Wire Format
//!
//! One JSON array per cycle, terminated by `\n`:
//!
//! ```text
//! [{"name":"Unknown","address":"AA:BB:CC:DD:EE:FF","rssi":-55,"timestamp":1700000000000},
//!  {"name":"SpoofedDevice","address":"02:11:22:33:00:00","rssi":-61,"timestamp":1700000000000,
//!   "spoofed":true,"manufacturerHex":"deadbeef33445566778899aabbccddeeff112233"}]
//! ```

pub mod advertisement;
pub mod batch;
pub mod errors;
pub mod observation;
pub mod spoof_mode;

mod hex_payload;

pub use advertisement::{parse_company_key, Advertisement};
pub use batch::{decode_line, Batch};
pub use errors::{CodecError, ModeParseError};
pub use observation::{Observation, UNKNOWN_NAME};
pub use spoof_mode::SpoofMode;
