//! Ports module for the spoof relay.
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::SpoofRelayApi;
pub use outbound::{AdvertisementSource, BatchSink, Clock, CycleObserver, IngestStats};
