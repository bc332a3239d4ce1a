use serde::Serialize;
use std::fmt;

/// Spoofing technique a detection points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatType {
    MacRandomization,
    UuidSpoofing,
    BeaconFlooding,
}

impl ThreatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MacRandomization => "MAC_RANDOMIZATION",
            Self::UuidSpoofing => "UUID_SPOOFING",
            Self::BeaconFlooding => "BEACON_FLOODING",
        }
    }
}

impl fmt::Display for ThreatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flagged address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub address: String,
    pub threat: ThreatType,
    pub description: String,
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}: {}", self.address, self.threat, self.description)
    }
}
