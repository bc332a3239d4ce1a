//! # Line Feed Source
//!
//! Advertisement source reading one JSON advertisement per line from any
//! async reader (stdin, a capture file, a pipe from a scanner process).
//!
//! ```text
//! {"address":"AA:BB:CC:DD:EE:FF","name":"Tag","rssi":-61,"manufacturerData":{"0xFFFF":"0102"}}
//! ```
//!
//! Blank lines are ignored. Malformed lines are logged and counted, never
//! fatal.

use async_trait::async_trait;
use shared_types::Advertisement;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::IngestError;
use crate::ports::{AdvertisementSource, IngestStats};

pub struct LineFeedSource<R> {
    reader: R,
    label: String,
}

impl<R> LineFeedSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            reader,
            label: label.into(),
        }
    }
}

#[async_trait]
impl<R> AdvertisementSource for LineFeedSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn run(
        self: Box<Self>,
        tx: mpsc::Sender<Advertisement>,
    ) -> Result<IngestStats, IngestError> {
        let LineFeedSource { reader, label } = *self;
        let mut lines = reader.lines();
        let mut stats = IngestStats::default();
        let mut line_no = 0u64;

        while let Some(line) = lines.next_line().await.map_err(IngestError::Read)? {
            line_no += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Advertisement>(line) {
                Ok(adv) => {
                    tx.send(adv).await.map_err(|_| IngestError::ChannelClosed)?;
                    stats.accepted += 1;
                }
                Err(e) => {
                    warn!(
                        source = %label,
                        line = line_no,
                        error = %e,
                        "Skipping malformed advertisement"
                    );
                    stats.rejected += 1;
                }
            }
        }

        debug!(
            source = %label,
            accepted = stats.accepted,
            rejected = stats.rejected,
            "Advertisement feed exhausted"
        );
        Ok(stats)
    }
}
