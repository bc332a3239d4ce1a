//! # Relay Session Flows
//!
//! A raw TCP client against the real relay endpoint:
//!
//! 1. One genuine device, `mac_randomization`: cycles 1-3 relay the device,
//!    cycle 4 adds seven spoofed records with the sentinel payload
//! 2. Only one client is ever served
//! 3. Empty cycles write `[]` when configured to
//! 4. The session ends once the client disconnects
//! 5. Wire keys: `spoofed` only on synthetic records, lowercase hex payloads

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, BufReader, Lines};
    use tokio::net::TcpStream;
    use tokio::time::timeout;

    use shared_types::{decode_line, Observation, SpoofMode};
    use spoof_relay::adapters::LineFeedSource;
    use spoof_relay::{SPOOF_DEVICE_NAME, SPOOF_MANUFACTURER_PAYLOAD, SPOOF_SERVICE_UUID};

    use crate::integration::{advertisement, loopback_config, start_relay, RepeatingSource};

    const LINE_TIMEOUT: Duration = Duration::from_secs(5);

    async fn next_batch(lines: &mut Lines<BufReader<TcpStream>>) -> Vec<Observation> {
        let line = timeout(LINE_TIMEOUT, lines.next_line())
            .await
            .expect("batch within timeout")
            .expect("readable stream")
            .expect("relay still connected");
        decode_line(&line).expect("valid batch line")
    }

    fn repeating_device() -> Box<RepeatingSource> {
        Box::new(RepeatingSource::new(
            vec![advertisement("AA:BB:CC:DD:EE:FF", -55, "0102030405")],
            Duration::from_millis(10),
        ))
    }

    #[tokio::test]
    async fn test_mac_randomization_injects_on_fourth_cycle() {
        let config = loopback_config(SpoofMode::IdentityRandomization, 60, 4);
        let (addr, relay) = start_relay(config, repeating_device()).await;

        let client = TcpStream::connect(addr).await.unwrap();
        let mut lines = BufReader::new(client).lines();

        for _ in 0..3 {
            let batch = next_batch(&mut lines).await;
            assert_eq!(batch.len(), 1);
            assert_eq!(batch[0].identity, "AA:BB:CC:DD:EE:FF");
            assert_eq!(batch[0].display_name, "Tag");
            assert_eq!(batch[0].manufacturer_payload.as_deref(), Some(&[1, 2, 3, 4, 5][..]));
            assert!(!batch[0].is_synthetic);
        }

        let batch = next_batch(&mut lines).await;
        assert_eq!(batch.len(), 8);
        assert!(!batch[0].is_synthetic);
        for (i, spoofed) in batch[1..].iter().enumerate() {
            assert!(spoofed.is_synthetic);
            assert_eq!(spoofed.display_name, SPOOF_DEVICE_NAME);
            assert_eq!(spoofed.identity, format!("02:11:22:33:00:{i:02X}"));
            assert_eq!(
                spoofed.manufacturer_payload.as_deref(),
                Some(&SPOOF_MANUFACTURER_PAYLOAD[..])
            );
            assert!((-90..=-40).contains(&spoofed.signal_strength));
        }

        drop(lines);
        let summary = timeout(LINE_TIMEOUT, relay)
            .await
            .expect("session ends after disconnect")
            .unwrap()
            .unwrap();
        assert!(summary.batches_sent >= 4);
    }

    #[tokio::test]
    async fn test_wire_keys_on_raw_line() {
        let config = loopback_config(SpoofMode::IdentityRandomization, 40, 2);
        let source = Box::new(RepeatingSource::new(
            vec![advertisement("AA:BB:CC:DD:EE:01", -61, "ABCDEF0A")],
            Duration::from_millis(10),
        ));
        let (addr, relay) = start_relay(config, source).await;

        let mut lines = BufReader::new(TcpStream::connect(addr).await.unwrap()).lines();
        let mut raw = Vec::new();
        for _ in 0..2 {
            let line = timeout(LINE_TIMEOUT, lines.next_line())
                .await
                .expect("batch within timeout")
                .unwrap()
                .expect("relay still connected");
            raw.push(serde_json::from_str::<serde_json::Value>(&line).unwrap());
        }

        let genuine = &raw[0][0];
        assert_eq!(raw[0].as_array().unwrap().len(), 1);
        assert!(genuine.get("spoofed").is_none());
        assert_eq!(genuine["address"], "AA:BB:CC:DD:EE:01");
        assert_eq!(genuine["rssi"], -61);
        assert_eq!(genuine["manufacturerHex"], "abcdef0a");
        assert_eq!(
            genuine["serviceUUIDs"],
            serde_json::json!(["0000180f-0000-1000-8000-00805f9b34fb"])
        );
        assert!(genuine["timestamp"].is_u64());

        let injected = raw[1].as_array().unwrap();
        assert_eq!(injected.len(), 8);
        assert!(injected[0].get("spoofed").is_none());
        for spoofed in &injected[1..] {
            assert_eq!(spoofed["spoofed"], true);
            assert_eq!(
                spoofed["manufacturerHex"],
                "deadbeef33445566778899aabbccddeeff112233"
            );
            assert!(spoofed.get("serviceUUIDs").is_none());
        }
        relay.abort();
    }

    #[tokio::test]
    async fn test_uuid_spoofing_shares_one_uuid() {
        let config = loopback_config(SpoofMode::ServiceIdentifierSpoofing, 40, 2);
        let (addr, relay) = start_relay(config, repeating_device()).await;

        let mut lines = BufReader::new(TcpStream::connect(addr).await.unwrap()).lines();
        next_batch(&mut lines).await;
        let batch = next_batch(&mut lines).await;

        assert_eq!(batch.len(), 8);
        for spoofed in &batch[1..] {
            assert_eq!(
                spoofed.service_identifiers.as_deref(),
                Some(&[SPOOF_SERVICE_UUID.to_string()][..])
            );
            assert!(spoofed.manufacturer_payload.is_none());
        }
        relay.abort();
    }

    #[tokio::test]
    async fn test_second_client_refused() {
        let config = loopback_config(SpoofMode::Demo, 40, 4);
        let (addr, relay) = start_relay(config, repeating_device()).await;

        let mut lines = BufReader::new(TcpStream::connect(addr).await.unwrap()).lines();
        // A received batch proves the first client was accepted.
        next_batch(&mut lines).await;

        assert!(TcpStream::connect(addr).await.is_err());
        relay.abort();
    }

    #[tokio::test]
    async fn test_empty_cycles_write_empty_arrays_when_enabled() {
        let mut config = loopback_config(SpoofMode::BeaconFlooding, 40, 2);
        config.relay.send_empty_batches = true;
        let silent = Box::new(LineFeedSource::new(&b""[..], "empty"));
        let (addr, relay) = start_relay(config, silent).await;

        let mut lines = BufReader::new(TcpStream::connect(addr).await.unwrap()).lines();
        // Cycle 2 is an injection cycle with nothing to flood: still empty.
        for _ in 0..3 {
            assert!(next_batch(&mut lines).await.is_empty());
        }
        relay.abort();
    }

    #[tokio::test]
    async fn test_empty_cycles_silent_by_default() {
        let config = loopback_config(SpoofMode::IdentityRandomization, 30, 4);
        let silent = Box::new(LineFeedSource::new(&b""[..], "empty"));
        let (addr, relay) = start_relay(config, silent).await;

        let mut lines = BufReader::new(TcpStream::connect(addr).await.unwrap()).lines();
        // Cycle 4 injects seven spoofed devices even with no genuine ones.
        let batch = next_batch(&mut lines).await;
        assert_eq!(batch.len(), 7);
        assert!(batch.iter().all(|o| o.is_synthetic));
        relay.abort();
    }
}
