//! Monitor command: connect to a relay and print detections per batch.

use anyhow::{Context, Result};
use beacon_heuristics::{BatchReport, HeuristicsEngine, RelayMonitor};
use relay_telemetry::DETECTIONS;
use std::collections::HashSet;
use std::io::Write;
use tokio::io::AsyncBufRead;
use tracing::info;

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Connect to `addr` and report until the relay closes the stream.
pub async fn run_monitor(
    addr: &str,
    trusted: HashSet<String>,
    format: ReportFormat,
) -> Result<u64> {
    let monitor = RelayMonitor::connect(addr, HeuristicsEngine::default(), trusted).await?;
    drive(monitor, format, &mut std::io::stdout()).await
}

/// Pump reports from `monitor` into `out`. Returns the number of batches.
///
/// Each report reaches `out` as a single `write_all`, so no writer lock is
/// held while waiting on the relay.
pub async fn drive<R, W>(
    mut monitor: RelayMonitor<R>,
    format: ReportFormat,
    out: &mut W,
) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut batches = 0;
    while let Some(report) = monitor.next_report().await? {
        batches += 1;
        for detection in &report.detections {
            DETECTIONS
                .with_label_values(&[detection.threat.as_str()])
                .inc();
        }
        info!(
            batch = report.sequence,
            records = report.records,
            detections = report.detections.len(),
            "Analysed relay batch"
        );
        write_report(&report, format, out)?;
    }
    Ok(batches)
}

fn write_report<W: Write>(report: &BatchReport, format: ReportFormat, out: &mut W) -> Result<()> {
    let mut buf = Vec::new();
    match format {
        ReportFormat::Json => {
            serde_json::to_writer(&mut buf, report).context("Failed to encode report")?;
            writeln!(buf)?;
        }
        ReportFormat::Text => {
            writeln!(buf, "Batch {} ({} records)", report.sequence, report.records)?;
            if report.is_clean() {
                writeln!(buf, "No BLE threats found.")?;
            }
            for detection in &report.detections {
                writeln!(buf, "{detection}")?;
            }
        }
    }
    out.write_all(&buf)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    fn monitor(input: &'static str) -> RelayMonitor<BufReader<&'static [u8]>> {
        RelayMonitor::from_reader(
            BufReader::new(input.as_bytes()),
            HeuristicsEngine::default(),
            HashSet::new(),
        )
    }

    const TWO_SPOOFED: &str = concat!(
        r#"[{"name":"SpoofedDevice","address":"02:11:22:33:00:00","rssi":-50,"timestamp":1,"spoofed":true,"manufacturerHex":"beef"},"#,
        r#"{"name":"SpoofedDevice","address":"02:11:22:33:00:01","rssi":-51,"timestamp":1,"spoofed":true,"manufacturerHex":"beef"}]"#,
        "\n"
    );

    #[tokio::test]
    async fn test_text_output() {
        let mut out = Vec::new();
        let batches = drive(monitor(TWO_SPOOFED), ReportFormat::Text, &mut out)
            .await
            .unwrap();
        assert_eq!(batches, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Batch 1 (2 records)\n"));
        assert!(text.contains(
            "02:11:22:33:00:00 → MAC_RANDOMIZATION: Multiple MACs with same signature"
        ));
    }

    /// Records every `write` call separately.
    #[derive(Default)]
    struct ChunkWriter {
        chunks: Vec<Vec<u8>>,
    }

    impl Write for ChunkWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.chunks.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_one_write_per_report() {
        let input = concat!(
            r#"[{"name":"Tag","address":"AA:BB:CC:DD:EE:01","rssi":-60,"timestamp":1}]"#,
            "\n",
            r#"[{"name":"Tag","address":"AA:BB:CC:DD:EE:02","rssi":-61,"timestamp":2}]"#,
            "\n"
        );
        let mut out = ChunkWriter::default();
        let batches = drive(monitor(input), ReportFormat::Text, &mut out)
            .await
            .unwrap();

        assert_eq!(batches, 2);
        assert_eq!(out.chunks.len(), 2);
        assert_eq!(
            String::from_utf8(out.chunks[1].clone()).unwrap(),
            "Batch 2 (1 records)\nNo BLE threats found.\n"
        );
    }

    #[tokio::test]
    async fn test_json_output() {
        let mut out = Vec::new();
        drive(monitor(TWO_SPOOFED), ReportFormat::Json, &mut out)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["sequence"], 1);
        assert_eq!(value["detections"][0]["threat"], "MAC_RANDOMIZATION");
    }
}
