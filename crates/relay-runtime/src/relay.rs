//! # Relay Wiring
//!
//! Composes the relay for one session:
//!
//! 1. Bind the endpoint and wait for the single client
//! 2. Spawn the ingestion task and the advertisement source
//! 3. Run the cycle loop until the client write fails

use anyhow::{Context, Result};
use shared_types::{Advertisement, SpoofMode};
use spoof_relay::adapters::{Ingestor, LineFeedSource, SystemClock, TcpSessionListener};
use spoof_relay::{
    AdvertisementSource, Clock, ObservationStore, RelayService, SessionSummary, SpoofRelayApi,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::RuntimeConfig;
use crate::metrics_observer::PrometheusObserver;

/// A bound relay, not yet serving.
pub struct RelayRuntime {
    config: RuntimeConfig,
    mode: SpoofMode,
    listener: TcpSessionListener,
}

impl RelayRuntime {
    /// Validate `config` and bind the listen address.
    pub async fn bind(config: RuntimeConfig) -> Result<Self> {
        let mode = config.resolve().context("Invalid relay configuration")?;
        let listener = TcpSessionListener::bind(&config.listen_addr)
            .await
            .context("Failed to start relay endpoint")?;
        Ok(Self {
            config,
            mode,
            listener,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.listener.local_addr()
    }

    pub fn mode(&self) -> SpoofMode {
        self.mode
    }

    /// Serve one client with advertisements from `source`.
    ///
    /// Returns once a write to the client fails.
    pub async fn run(self, source: Box<dyn AdvertisementSource>) -> Result<SessionSummary> {
        let relay_config = self.config.relay.clone();
        let session = self
            .listener
            .await_single_client(relay_config.write_timeout())
            .await
            .context("Failed to accept relay client")?;

        let store = Arc::new(ObservationStore::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let (tx, rx) = mpsc::channel::<Advertisement>(relay_config.ingest_channel_capacity);

        let ingestor = Ingestor::from_config(Arc::clone(&store), Arc::clone(&clock), &relay_config);
        let ingest_task = tokio::spawn(ingestor.run(rx));
        let source_task = tokio::spawn(async move {
            match source.run(tx).await {
                Ok(stats) => info!(
                    accepted = stats.accepted,
                    rejected = stats.rejected,
                    "Advertisement source finished"
                ),
                Err(e) => warn!(error = %e, "Advertisement source stopped"),
            }
        });

        let mut service = RelayService::new(relay_config, self.mode, store, session)?
            .with_clock(clock)
            .with_observer(Arc::new(PrometheusObserver::new()));
        if let Some(seed) = self.config.seed {
            service = service.with_seed(seed);
        }

        let summary = service.run_session().await;

        source_task.abort();
        ingest_task.abort();
        Ok(summary)
    }
}

/// Advertisement source for the configured feed: a file, or stdin.
pub async fn feed_source(feed: Option<&Path>) -> Result<Box<dyn AdvertisementSource>> {
    match feed {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open advertisement feed {}", path.display()))?;
            info!(path = %path.display(), "Reading advertisements from file");
            Ok(Box::new(LineFeedSource::new(
                BufReader::new(file),
                path.display().to_string(),
            )))
        }
        None => {
            info!("Reading advertisements from stdin");
            Ok(Box::new(LineFeedSource::new(
                BufReader::new(tokio::io::stdin()),
                "stdin",
            )))
        }
    }
}
