//! Detection domain: threat types and the heuristics engine.

pub mod engine;
pub mod threat;

pub use engine::{HeuristicsConfig, HeuristicsEngine};
pub use threat::{Detection, ThreatType};
