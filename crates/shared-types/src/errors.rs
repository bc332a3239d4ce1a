//! # Error Types
//!
//! Errors raised while encoding, decoding or parsing shared types.

use thiserror::Error;

/// Errors from the newline-delimited JSON wire codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Batch could not be serialized.
    #[error("Failed to encode batch: {0}")]
    Encode(#[source] serde_json::Error),

    /// Line was not a valid JSON array of observations.
    #[error("Failed to decode batch line: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Unrecognised spoof mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown spoof mode '{0}' (expected mac_randomization, uuid_spoofing, beacon_flooding or demo)")]
pub struct ModeParseError(pub String);
