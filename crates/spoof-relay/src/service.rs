//! # Relay Service
//!
//! Runs one session's cycle loop over a connected [`BatchSink`].
//!
//! Each cycle:
//! 1. Advance the scheduler (may switch strategy in demo mode)
//! 2. Drain the observation store
//! 3. Assemble the batch (optional injection)
//! 4. Send, or skip an empty batch per config
//! 5. Report to the observer
//!
//! The store lock is released by `drain_all` before the write starts, so
//! ingestion continues while a write blocks.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared_types::SpoofMode;
use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::adapters::clock::SystemClock;
use crate::adapters::observer::LoggingObserver;
use crate::config::RelayConfig;
use crate::domain::{
    BatchAssembler, CycleReport, CycleScheduler, InjectionOutcome, ObservationStore, RelayError,
    SessionSummary,
};
use crate::ports::{BatchSink, Clock, CycleObserver, SpoofRelayApi};

/// Drives the relay pipeline for a single downstream session.
pub struct RelayService<S: BatchSink> {
    config: RelayConfig,
    store: Arc<ObservationStore>,
    scheduler: CycleScheduler,
    assembler: BatchAssembler,
    sink: S,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn CycleObserver>,
    rng: StdRng,
    batches_sent: u64,
    records_sent: u64,
}

impl<S: BatchSink> RelayService<S> {
    /// Create a service with the system clock, an entropy-seeded RNG and a
    /// logging observer.
    pub fn new(
        config: RelayConfig,
        mode: SpoofMode,
        store: Arc<ObservationStore>,
        sink: S,
    ) -> Result<Self, RelayError> {
        config.validate()?;
        Ok(Self {
            scheduler: CycleScheduler::new(mode, config.rotation_period),
            assembler: BatchAssembler::from_config(&config),
            config,
            store,
            sink,
            clock: Arc::new(SystemClock::new()),
            observer: Arc::new(LoggingObserver),
            rng: StdRng::from_entropy(),
            batches_sent: 0,
            records_sent: 0,
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn CycleObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Use a fixed RNG seed (tests, reproducible demos).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn scheduler(&self) -> &CycleScheduler {
        &self.scheduler
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn log_injection(&self, cycle: u64, injection: &InjectionOutcome) {
        match injection {
            InjectionOutcome::NotDue => {}
            InjectionOutcome::Injected {
                strategy,
                count,
                flood_source: Some(source),
            } => info!(
                cycle,
                mode = %strategy,
                count,
                source = %source,
                "Injected beacon flood entries"
            ),
            InjectionOutcome::Injected { strategy, count, .. } => {
                info!(cycle, mode = %strategy, count, "Injected spoofed devices")
            }
            InjectionOutcome::Skipped { strategy, reason } => {
                warn!(cycle, mode = %strategy, reason = %reason, "Skipping injection")
            }
        }
    }
}

#[async_trait]
impl<S: BatchSink> SpoofRelayApi for RelayService<S> {
    async fn run_cycle(&mut self) -> Result<CycleReport, RelayError> {
        let tick = self.scheduler.advance();
        if let Some(mode) = tick.switched_to {
            info!(cycle = tick.cycle, mode = %mode, "Demo rotation: switching spoof mode");
        }

        let genuine = self.store.drain_all();
        let now = self.clock.now_millis();
        let assembled = self
            .assembler
            .assemble(genuine, &tick, now, &mut self.rng);
        self.log_injection(tick.cycle, &assembled.injection);

        let batch = assembled.batch;
        let mut report = CycleReport {
            cycle: tick.cycle,
            strategy: tick.strategy,
            switched_to: tick.switched_to,
            genuine: batch.genuine_count(),
            synthetic: batch.synthetic_count(),
            injection: assembled.injection,
            sent: false,
            bytes: 0,
        };

        if batch.is_empty() && !self.config.send_empty_batches {
            info!(cycle = tick.cycle, "No devices found this cycle");
            self.observer.on_cycle(&report);
            return Ok(report);
        }

        let bytes = self
            .sink
            .send(&batch)
            .await
            .map_err(RelayError::TransportWriteFailure)?;

        self.batches_sent += 1;
        self.records_sent += batch.len() as u64;
        report.sent = true;
        report.bytes = bytes;

        if batch.is_empty() {
            info!(cycle = tick.cycle, "No devices found this cycle, sent empty batch");
        } else {
            info!(
                cycle = tick.cycle,
                genuine = report.genuine,
                synthetic = report.synthetic,
                bytes,
                "Sent batch to peer"
            );
        }

        self.observer.on_cycle(&report);
        Ok(report)
    }

    async fn run_session(&mut self) -> SessionSummary {
        let period = self.config.cycle_interval();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            peer = %self.sink.peer(),
            mode = %self.scheduler.mode(),
            interval_ms = self.config.cycle_interval_ms,
            rotation_period = self.config.rotation_period,
            "Relay session started"
        );

        loop {
            ticker.tick().await;
            match self.run_cycle().await {
                Ok(report) => debug!(cycle = report.cycle, sent = report.sent, "Cycle complete"),
                Err(RelayError::TransportWriteFailure(termination)) => {
                    error!(
                        cycle = self.scheduler.cycle_count(),
                        error = %termination,
                        "Error sending to peer, ending session"
                    );
                    let summary = SessionSummary {
                        cycles: self.scheduler.cycle_count(),
                        batches_sent: self.batches_sent,
                        records_sent: self.records_sent,
                        termination,
                    };
                    self.observer.on_session_end(&summary);
                    return summary;
                }
                // Config is validated in `new`; nothing else can surface here.
                Err(other) => warn!(error = %other, "Unexpected cycle error"),
            }
        }
    }
}
