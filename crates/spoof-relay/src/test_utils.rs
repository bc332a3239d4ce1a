//! Test doubles for the relay ports.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::Batch;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::TransportError;
use crate::ports::{BatchSink, Clock};

/// Clock pinned to a settable instant.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicU64,
}

impl FixedClock {
    pub fn new(now_millis: u64) -> Self {
        Self {
            now: AtomicU64::new(now_millis),
        }
    }

    pub fn set(&self, now_millis: u64) {
        self.now.store(now_millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
struct SinkState {
    batches: Vec<Batch>,
    attempts: usize,
}

/// In-memory sink that records every batch it is given.
///
/// Clones share state, so a test can keep a handle while the service owns
/// the sink.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    state: Arc<Mutex<SinkState>>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `successes` sends, then fail every later one with a broken pipe.
    pub fn failing_after(successes: usize) -> Self {
        Self {
            state: Arc::default(),
            fail_after: Some(successes),
        }
    }

    pub fn batches(&self) -> Vec<Batch> {
        self.state.lock().batches.clone()
    }

    pub fn attempts(&self) -> usize {
        self.state.lock().attempts
    }
}

#[async_trait]
impl BatchSink for RecordingSink {
    async fn send(&mut self, batch: &Batch) -> Result<usize, TransportError> {
        let mut state = self.state.lock();
        state.attempts += 1;
        if let Some(limit) = self.fail_after {
            if state.batches.len() >= limit {
                return Err(TransportError::Write(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "recording sink closed",
                )));
            }
        }
        let line = batch.encode_line()?;
        state.batches.push(batch.clone());
        Ok(line.len())
    }

    fn peer(&self) -> String {
        "recording-sink".to_string()
    }
}
