//! # Beacon Heuristics
//!
//! Consumer side of the relay wire format: a lenient batch decoder, the
//! spoofing heuristics a downstream detector runs over each batch, and a
//! monitor that connects to a relay endpoint and reports detections.
//!
//! ## Heuristics
//!
//! | Threat | Trigger |
//! |--------|---------|
//! | MAC randomization | same manufacturer payload on more than one address |
//! | UUID spoofing | same service UUID on more than `uuid_address_threshold` addresses |
//! | Beacon flooding | more than `flood_threshold` records from one address |
//!
//! Trusted addresses never produce detections.
//!
//! ```rust
//! use beacon_heuristics::{HeuristicsEngine, ThreatType};
//! use shared_types::Observation;
//! use std::collections::HashSet;
//!
//! let batch = vec![
//!     Observation::new("02:11:22:33:00:00", -50, 1).with_manufacturer_payload(vec![0xde, 0xad]),
//!     Observation::new("02:11:22:33:00:01", -60, 1).with_manufacturer_payload(vec![0xde, 0xad]),
//! ];
//! let detections = HeuristicsEngine::default().analyze(&batch, &HashSet::new());
//! assert!(detections.iter().all(|d| d.threat == ThreatType::MacRandomization));
//! assert_eq!(detections.len(), 2);
//! ```

pub mod decode;
pub mod domain;
pub mod error;
pub mod monitor;

pub use decode::decode_lenient;
pub use domain::{Detection, HeuristicsConfig, HeuristicsEngine, ThreatType};
pub use error::MonitorError;
pub use monitor::{BatchReport, RelayMonitor};
