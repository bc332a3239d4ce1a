//! # Heuristics Engine
//!
//! Stateless analysis of one batch. Each detector groups records by the
//! feature it watches and flags every address in an oversized group.
//! Output order is deterministic: detector order, then group key, then
//! address.

use shared_types::Observation;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::threat::{Detection, ThreatType};

/// Detector thresholds. A group triggers when it is strictly larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicsConfig {
    /// Distinct addresses sharing one manufacturer payload.
    pub signature_address_threshold: usize,
    /// Distinct addresses sharing one service UUID.
    pub uuid_address_threshold: usize,
    /// Records from one address within a batch.
    pub flood_threshold: usize,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            signature_address_threshold: 1,
            uuid_address_threshold: 3,
            flood_threshold: 5000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicsEngine {
    config: HeuristicsConfig,
}

impl HeuristicsEngine {
    pub fn new(config: HeuristicsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeuristicsConfig {
        &self.config
    }

    /// Run every detector over `batch`, dropping detections for `trusted`
    /// addresses.
    pub fn analyze(&self, batch: &[Observation], trusted: &HashSet<String>) -> Vec<Detection> {
        let mut detections = self.detect_mac_randomization(batch);
        detections.extend(self.detect_uuid_spoofing(batch));
        detections.extend(self.detect_beacon_flooding(batch));
        detections.retain(|d| !trusted.contains(&d.address));
        detections
    }

    fn detect_mac_randomization(&self, batch: &[Observation]) -> Vec<Detection> {
        let mut by_signature: BTreeMap<&[u8], BTreeSet<&str>> = BTreeMap::new();
        for obs in batch {
            if let Some(payload) = obs.manufacturer_payload.as_deref() {
                by_signature
                    .entry(payload)
                    .or_default()
                    .insert(obs.identity.as_str());
            }
        }
        flag_groups(
            by_signature.into_values(),
            self.config.signature_address_threshold,
            ThreatType::MacRandomization,
            "Multiple MACs with same signature",
        )
    }

    fn detect_uuid_spoofing(&self, batch: &[Observation]) -> Vec<Detection> {
        let mut by_uuid: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
        for obs in batch {
            for uuid in obs.service_identifiers.iter().flatten() {
                by_uuid
                    .entry(uuid.to_ascii_lowercase())
                    .or_default()
                    .insert(obs.identity.as_str());
            }
        }
        flag_groups(
            by_uuid.into_values(),
            self.config.uuid_address_threshold,
            ThreatType::UuidSpoofing,
            "Same UUID seen across many MACs",
        )
    }

    fn detect_beacon_flooding(&self, batch: &[Observation]) -> Vec<Detection> {
        let mut per_address: BTreeMap<&str, usize> = BTreeMap::new();
        for obs in batch {
            *per_address.entry(obs.identity.as_str()).or_default() += 1;
        }
        per_address
            .into_iter()
            .filter(|(_, count)| *count > self.config.flood_threshold)
            .map(|(address, _)| Detection {
                address: address.to_string(),
                threat: ThreatType::BeaconFlooding,
                description: "Excessive beacons from MAC".to_string(),
            })
            .collect()
    }
}

fn flag_groups<'a>(
    groups: impl Iterator<Item = BTreeSet<&'a str>>,
    threshold: usize,
    threat: ThreatType,
    description: &str,
) -> Vec<Detection> {
    groups
        .filter(|addresses| addresses.len() > threshold)
        .flat_map(|addresses| addresses.into_iter())
        .map(|address| Detection {
            address: address.to_string(),
            threat,
            description: description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_trust() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_detect_mac_randomization() {
        let signature = vec![0x01, 0x02, 0x03];
        let batch = vec![
            Observation::new("AA:BB:CC:01", -40, 1000).with_manufacturer_payload(signature.clone()),
            Observation::new("AA:BB:CC:02", -42, 1001).with_manufacturer_payload(signature.clone()),
            Observation::new("AA:BB:CC:03", -43, 1002).with_manufacturer_payload(signature),
        ];
        let results = HeuristicsEngine::default().analyze(&batch, &no_trust());
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|d| d.threat == ThreatType::MacRandomization));
        assert_eq!(results[0].address, "AA:BB:CC:01");
    }

    #[test]
    fn test_single_address_signature_is_clean() {
        let batch = vec![
            Observation::new("AA", -40, 1).with_manufacturer_payload(vec![1]),
            Observation::new("BB", -40, 1).with_manufacturer_payload(vec![2]),
        ];
        assert!(HeuristicsEngine::default().analyze(&batch, &no_trust()).is_empty());
    }

    #[test]
    fn test_detect_uuid_spoofing_above_threshold() {
        let uuid = "f000aaaa-0451-4000-b000-000000000000".to_string();
        let batch: Vec<_> = (1..=4)
            .map(|i| {
                Observation::new(format!("11:22:33:0{i}"), -60, 2000)
                    .with_service_identifiers(vec![uuid.clone()])
            })
            .collect();
        let results = HeuristicsEngine::default().analyze(&batch, &no_trust());
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|d| d.threat == ThreatType::UuidSpoofing));

        // Exactly at the threshold is not enough.
        let results = HeuristicsEngine::default().analyze(&batch[..3], &no_trust());
        assert!(results.is_empty());
    }

    #[test]
    fn test_detect_beacon_flooding() {
        let batch: Vec<_> = (1..=6000)
            .map(|ts| Observation::new("22:33:44:55:66:77", -50, ts))
            .collect();
        let results = HeuristicsEngine::default().analyze(&batch, &no_trust());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].threat, ThreatType::BeaconFlooding);
        assert_eq!(results[0].address, "22:33:44:55:66:77");
    }

    #[test]
    fn test_trusted_addresses_filtered() {
        let ad = Observation::new("AA:BB:CC:DD:EE:FF", -45, 1234)
            .with_manufacturer_payload(vec![0x01, 0x02, 0x03]);
        let other = Observation::new("11:11:11:11:11:11", -45, 1234)
            .with_manufacturer_payload(vec![0x01, 0x02, 0x03]);
        let trusted: HashSet<String> = ["AA:BB:CC:DD:EE:FF".to_string()].into();

        let results =
            HeuristicsEngine::default().analyze(&[ad.clone(), ad.clone(), ad], &trusted);
        assert!(results.is_empty());

        let results = HeuristicsEngine::default().analyze(
            &[
                Observation::new("AA:BB:CC:DD:EE:FF", -45, 1)
                    .with_manufacturer_payload(vec![0x01, 0x02, 0x03]),
                other,
            ],
            &trusted,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].address, "11:11:11:11:11:11");
    }

    #[test]
    fn test_custom_thresholds() {
        let engine = HeuristicsEngine::new(HeuristicsConfig {
            flood_threshold: 2,
            ..Default::default()
        });
        let batch: Vec<_> = (0..3).map(|ts| Observation::new("AA", -50, ts)).collect();
        assert_eq!(engine.analyze(&batch, &no_trust()).len(), 1);
    }
}
