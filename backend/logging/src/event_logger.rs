//! Conversion Event Logger
//!
//! Per-record anomalies and run milestones as structured events on the
//! `conversion_events` target, so they land in the NDJSON log.

use benchforge_core::{Anomaly, RunReport, Severity};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

pub const EVENT_TARGET: &str = "conversion_events";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversionEvent {
    Started {
        input: String,
        family: String,
        start_page: usize,
    },
    Anomaly {
        severity: Severity,
        number: String,
        detail: String,
    },
    Finished {
        candidates: usize,
        accepted: usize,
        headers_dropped: usize,
        warnings: usize,
        sheets: usize,
    },
}

impl ConversionEvent {
    pub fn from_anomaly(anomaly: &Anomaly) -> Self {
        ConversionEvent::Anomaly {
            severity: anomaly.severity(),
            number: anomaly.number().to_string(),
            detail: anomaly.describe(),
        }
    }

    pub fn finished(report: &RunReport, sheets: usize) -> Self {
        ConversionEvent::Finished {
            candidates: report.candidates,
            accepted: report.accepted,
            headers_dropped: report.headers_dropped,
            warnings: report.warning_count(),
            sheets,
        }
    }

    fn is_warning(&self) -> bool {
        matches!(
            self,
            ConversionEvent::Anomaly {
                severity: Severity::Warning,
                ..
            }
        )
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub run: String,
    pub timestamp: DateTime<Utc>,
    pub event: ConversionEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Emit one event for the run labelled `run` (usually the input file name).
    pub fn log_event(run: &str, event: ConversionEvent) -> EventLogEntry {
        let entry = EventLogEntry {
            run: run.into(),
            timestamp: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).unwrap_or_default();
        if entry.event.is_warning() {
            warn!(target: EVENT_TARGET, event = %json, "Conversion event");
        } else {
            info!(target: EVENT_TARGET, event = %json, "Conversion event");
        }
        entry
    }

    /// Emit every anomaly in `report`.
    pub fn log_report(run: &str, report: &RunReport) {
        for anomaly in &report.anomalies {
            Self::log_event(run, ConversionEvent::from_anomaly(anomaly));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anomaly_event_serializes_with_tag() {
        let anomaly = Anomaly::UnmappedSection {
            prefix: 9,
            number: "9.1".parse().unwrap(),
        };
        let entry = EventLogger::log_event("benchmark.pdf", ConversionEvent::from_anomaly(&anomaly));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["run"], "benchmark.pdf");
        assert_eq!(json["event"]["type"], "anomaly");
        assert_eq!(json["event"]["severity"], "info");
        assert_eq!(json["event"]["number"], "9.1");
    }

    #[test]
    fn finished_event_counts_warnings() {
        let mut report = RunReport::default();
        report.record(Anomaly::FieldExtraction {
            number: "1.2".parse().unwrap(),
            line: 7,
        });
        match ConversionEvent::finished(&report, 3) {
            ConversionEvent::Finished { warnings, sheets, .. } => {
                assert_eq!(warnings, 1);
                assert_eq!(sheets, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
