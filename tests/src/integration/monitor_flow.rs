//! # Relay → Monitor Flows
//!
//! The heuristics monitor connected to a live relay must flag each spoofing
//! strategy on the batch that carries its injection.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;
    use tokio::time::timeout;

    use beacon_heuristics::{BatchReport, HeuristicsEngine, RelayMonitor, ThreatType};
    use shared_types::SpoofMode;

    use crate::integration::{advertisement, loopback_config, start_relay, RepeatingSource};

    const REPORT_TIMEOUT: Duration = Duration::from_secs(10);

    fn two_devices() -> Box<RepeatingSource> {
        Box::new(RepeatingSource::new(
            vec![
                advertisement("AA:BB:CC:DD:EE:01", -50, "0a0b01"),
                advertisement("AA:BB:CC:DD:EE:02", -65, "0a0b02"),
            ],
            Duration::from_millis(10),
        ))
    }

    async fn next<R>(monitor: &mut RelayMonitor<R>) -> BatchReport
    where
        R: tokio::io::AsyncBufRead + Unpin,
    {
        timeout(REPORT_TIMEOUT, monitor.next_report())
            .await
            .expect("report within timeout")
            .expect("relay readable")
            .expect("relay still connected")
    }

    #[tokio::test]
    async fn test_monitor_flags_uuid_spoofing_and_honours_trust() {
        let config = loopback_config(SpoofMode::ServiceIdentifierSpoofing, 40, 2);
        let (addr, relay) = start_relay(config, two_devices()).await;

        let trusted: HashSet<String> = ["02:11:22:33:00:00".to_string()].into();
        let mut monitor =
            RelayMonitor::connect(&addr.to_string(), HeuristicsEngine::default(), trusted)
                .await
                .unwrap();

        let clean = next(&mut monitor).await;
        assert!(clean.is_clean());

        let report = next(&mut monitor).await;
        assert_eq!(report.records, 9);
        assert_eq!(report.marked_synthetic, 7);
        assert_eq!(
            report.threats().into_iter().collect::<Vec<_>>(),
            vec![ThreatType::UuidSpoofing]
        );
        assert_eq!(report.detections.len(), 6);
        assert!(report
            .detections
            .iter()
            .all(|d| d.address != "02:11:22:33:00:00"));
        relay.abort();
    }

    #[tokio::test]
    async fn test_monitor_flags_beacon_flood() {
        let mut config = loopback_config(SpoofMode::BeaconFlooding, 60, 2);
        config.relay.flood_count = 6000;
        let (addr, relay) = start_relay(config, two_devices()).await;

        let mut monitor =
            RelayMonitor::connect(&addr.to_string(), HeuristicsEngine::default(), HashSet::new())
                .await
                .unwrap();

        next(&mut monitor).await;
        let report = next(&mut monitor).await;
        assert_eq!(report.records, 6002);
        assert_eq!(report.detections.len(), 1);
        assert_eq!(report.detections[0].threat, ThreatType::BeaconFlooding);
        assert!(report.detections[0].address.starts_with("AA:BB:CC:DD:EE:0"));
        relay.abort();
    }

    #[tokio::test]
    async fn test_demo_rotation_seen_by_monitor() {
        let config = loopback_config(SpoofMode::Demo, 40, 2);
        let (addr, relay) = start_relay(config, two_devices()).await;

        let mut monitor =
            RelayMonitor::connect(&addr.to_string(), HeuristicsEngine::default(), HashSet::new())
                .await
                .unwrap();

        let mut threats = Vec::new();
        for _ in 0..6 {
            let report = next(&mut monitor).await;
            threats.push(report.threats().into_iter().collect::<Vec<_>>());
        }

        // Switch on odd cycles, inject on even ones.
        assert_eq!(
            threats,
            vec![
                vec![],
                vec![ThreatType::MacRandomization],
                vec![],
                vec![ThreatType::UuidSpoofing],
                vec![],
                vec![ThreatType::BeaconFlooding],
            ]
        );
        relay.abort();
    }
}
