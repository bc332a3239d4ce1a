use tracing::{debug, info};

use crate::domain::{CycleReport, SessionSummary};
use crate::ports::CycleObserver;

/// Observer that writes a structured log line per cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl CycleObserver for LoggingObserver {
    fn on_cycle(&self, report: &CycleReport) {
        debug!(
            cycle = report.cycle,
            strategy = report.strategy.map(|s| s.as_str()).unwrap_or("none"),
            genuine = report.genuine,
            synthetic = report.synthetic,
            total = report.total(),
            sent = report.sent,
            bytes = report.bytes,
            "Cycle report"
        );
    }

    fn on_session_end(&self, summary: &SessionSummary) {
        info!(
            cycles = summary.cycles,
            batches_sent = summary.batches_sent,
            records_sent = summary.records_sent,
            reason = %summary.termination,
            "Relay session ended"
        );
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CycleObserver for NoopObserver {
    fn on_cycle(&self, _report: &CycleReport) {}

    fn on_session_end(&self, _summary: &SessionSummary) {}
}
