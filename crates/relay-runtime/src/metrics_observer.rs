//! Cycle observer backed by the Prometheus metrics in `relay-telemetry`.

use relay_telemetry::{
    metric_inc, BATCHES_SENT, BATCH_RECORDS, CYCLES_TOTAL, EMPTY_CYCLES, INJECTIONS,
    INJECTIONS_SKIPPED, LAST_BATCH_BYTES, RECORDS_RELAYED, WRITE_FAILURES,
};
use spoof_relay::adapters::LoggingObserver;
use spoof_relay::{CycleObserver, CycleReport, InjectionOutcome, SessionSummary};

/// Records metrics for every cycle, then hands the report to the logging
/// observer.
#[derive(Debug, Default)]
pub struct PrometheusObserver {
    log: LoggingObserver,
}

impl PrometheusObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CycleObserver for PrometheusObserver {
    fn on_cycle(&self, report: &CycleReport) {
        metric_inc!(CYCLES_TOTAL);
        if report.total() == 0 {
            metric_inc!(EMPTY_CYCLES);
        }

        match &report.injection {
            InjectionOutcome::Injected { strategy, .. } => {
                metric_inc!(INJECTIONS, &[strategy.as_str()]);
            }
            InjectionOutcome::Skipped { strategy, .. } => {
                metric_inc!(INJECTIONS_SKIPPED, &[strategy.as_str()]);
            }
            InjectionOutcome::NotDue => {}
        }

        if report.sent {
            metric_inc!(BATCHES_SENT);
            RECORDS_RELAYED
                .with_label_values(&["genuine"])
                .inc_by(report.genuine as f64);
            RECORDS_RELAYED
                .with_label_values(&["synthetic"])
                .inc_by(report.synthetic as f64);
            BATCH_RECORDS.observe(report.total() as f64);
            LAST_BATCH_BYTES.set(report.bytes as f64);
        }

        self.log.on_cycle(report);
    }

    fn on_session_end(&self, summary: &SessionSummary) {
        metric_inc!(WRITE_FAILURES);
        self.log.on_session_end(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::SpoofMode;

    #[test]
    fn test_sent_cycle_updates_metrics() {
        let before_cycles = CYCLES_TOTAL.get();
        let before_injections = INJECTIONS
            .with_label_values(&["uuid_spoofing"])
            .get();

        let report = CycleReport {
            cycle: 4,
            strategy: Some(SpoofMode::ServiceIdentifierSpoofing),
            switched_to: None,
            genuine: 2,
            synthetic: 7,
            injection: InjectionOutcome::Injected {
                strategy: SpoofMode::ServiceIdentifierSpoofing,
                count: 7,
                flood_source: None,
            },
            sent: true,
            bytes: 1234,
        };
        PrometheusObserver::new().on_cycle(&report);

        assert!(CYCLES_TOTAL.get() >= before_cycles + 1.0);
        assert!(
            INJECTIONS.with_label_values(&["uuid_spoofing"]).get() >= before_injections + 1.0
        );
    }
}
