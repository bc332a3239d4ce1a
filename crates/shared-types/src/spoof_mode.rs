//! # Spoof Mode
//!
//! Injection strategy for a relay session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ModeParseError;

/// Which synthetic records a session injects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpoofMode {
    /// Many fake addresses sharing one manufacturer payload.
    #[serde(rename = "mac_randomization")]
    IdentityRandomization,
    /// Many fake addresses advertising the same service UUID.
    #[serde(rename = "uuid_spoofing")]
    ServiceIdentifierSpoofing,
    /// Thousands of replays of one captured record.
    #[serde(rename = "beacon_flooding")]
    BeaconFlooding,
    /// Rotates through the three strategies above.
    #[serde(rename = "demo")]
    Demo,
}

impl SpoofMode {
    /// Demo rotation order.
    pub const ROTATION: [SpoofMode; 3] = [
        SpoofMode::IdentityRandomization,
        SpoofMode::ServiceIdentifierSpoofing,
        SpoofMode::BeaconFlooding,
    ];

    /// Name used on the command line and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdentityRandomization => "mac_randomization",
            Self::ServiceIdentifierSpoofing => "uuid_spoofing",
            Self::BeaconFlooding => "beacon_flooding",
            Self::Demo => "demo",
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }

    /// Whether this strategy produces synthetic records when its cycle comes.
    pub fn injects(&self) -> bool {
        !self.is_demo()
    }
}

impl fmt::Display for SpoofMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpoofMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mac_randomization" => Ok(Self::IdentityRandomization),
            "uuid_spoofing" => Ok(Self::ServiceIdentifierSpoofing),
            "beacon_flooding" => Ok(Self::BeaconFlooding),
            "demo" => Ok(Self::Demo),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}
