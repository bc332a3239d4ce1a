//! # Relay Monitor
//!
//! Downstream client for a relay endpoint. Reads one batch per line and
//! runs the heuristics over it.
//!
//! Lines identical to the previous one are skipped, as are empty batches.
//! A line that is not a JSON array is logged and skipped. End of stream
//! ends the monitor.

use serde::Serialize;
use shared_types::Observation;
use std::collections::{BTreeSet, HashSet};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::decode::decode_lenient;
use crate::domain::{Detection, HeuristicsEngine, ThreatType};
use crate::error::MonitorError;

/// Analysis of one received batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// 1-based count of analysed batches.
    pub sequence: u64,
    pub records: usize,
    /// Records carrying the `spoofed` marker.
    pub marked_synthetic: usize,
    pub detections: Vec<Detection>,
}

impl BatchReport {
    pub fn threats(&self) -> BTreeSet<ThreatType> {
        self.detections.iter().map(|d| d.threat).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.detections.is_empty()
    }
}

pub struct RelayMonitor<R> {
    lines: Lines<R>,
    last_line: Option<String>,
    engine: HeuristicsEngine,
    trusted: HashSet<String>,
    sequence: u64,
}

impl RelayMonitor<BufReader<TcpStream>> {
    /// Connect to a relay endpoint.
    pub async fn connect(
        addr: &str,
        engine: HeuristicsEngine,
        trusted: HashSet<String>,
    ) -> Result<Self, MonitorError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| MonitorError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        info!(addr, "Connected to relay");
        Ok(Self::from_reader(BufReader::new(stream), engine, trusted))
    }
}

impl<R> RelayMonitor<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn from_reader(reader: R, engine: HeuristicsEngine, trusted: HashSet<String>) -> Self {
        Self {
            lines: reader.lines(),
            last_line: None,
            engine,
            trusted,
            sequence: 0,
        }
    }

    /// Wait for the next non-empty, non-duplicate batch and analyse it.
    ///
    /// Returns `Ok(None)` once the relay closes the stream.
    pub async fn next_report(&mut self) -> Result<Option<BatchReport>, MonitorError> {
        while let Some(line) = self.lines.next_line().await? {
            if self.last_line.as_deref() == Some(line.as_str()) {
                debug!("Skipping repeated batch line");
                continue;
            }

            let batch = match decode_lenient(&line) {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(error = %e, "Skipping malformed batch line");
                    self.last_line = Some(line);
                    continue;
                }
            };
            self.last_line = Some(line);

            if batch.is_empty() {
                debug!("Relay sent an empty batch");
                continue;
            }

            return Ok(Some(self.analyze(&batch)));
        }
        info!(batches = self.sequence, "Relay closed the stream");
        Ok(None)
    }

    fn analyze(&mut self, batch: &[Observation]) -> BatchReport {
        self.sequence += 1;
        let detections = self.engine.analyze(batch, &self.trusted);
        BatchReport {
            sequence: self.sequence,
            records: batch.len(),
            marked_synthetic: batch.iter().filter(|o| o.is_synthetic).count(),
            detections,
        }
    }
}
