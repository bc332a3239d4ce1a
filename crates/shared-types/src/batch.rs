//! # Batch
//!
//! Ordered observations relayed for one cycle. Genuine records always come
//! first; synthetic records are appended after them.

use crate::errors::CodecError;
use crate::observation::Observation;

/// Observations assembled for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    observations: Vec<Observation>,
    genuine_count: usize,
}

impl Batch {
    /// Start a batch from the drained genuine observations.
    pub fn new(genuine: Vec<Observation>) -> Self {
        let genuine_count = genuine.len();
        Self {
            observations: genuine,
            genuine_count,
        }
    }

    /// Append generator output after the genuine records.
    pub fn extend_synthetic(&mut self, synthetic: Vec<Observation>) {
        self.observations.extend(synthetic);
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn genuine(&self) -> &[Observation] {
        &self.observations[..self.genuine_count]
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn genuine_count(&self) -> usize {
        self.genuine_count
    }

    pub fn synthetic_count(&self) -> usize {
        self.observations.len() - self.genuine_count
    }

    /// Encode as one JSON array followed by `\n`.
    pub fn encode_line(&self) -> Result<Vec<u8>, CodecError> {
        let mut bytes = serde_json::to_vec(&self.observations).map_err(CodecError::Encode)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Strictly decode one wire line into observations.
///
/// Consumers that must tolerate partially malformed input should decode
/// element by element instead.
pub fn decode_line(line: &str) -> Result<Vec<Observation>, CodecError> {
    serde_json::from_str(line.trim_end()).map_err(CodecError::Decode)
}
