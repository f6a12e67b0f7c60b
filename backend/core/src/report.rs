//! Per-record anomalies collected during a run.
//!
//! None of these stop the conversion; they are surfaced afterwards so the
//! operator can review the affected rows by hand.

use serde::Serialize;

use crate::types::SectionNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// Block skipped because no title could be derived.
    FieldExtraction { number: SectionNumber, line: usize },
    /// Two accepted records shared an identifier; the later one was kept.
    DuplicateIdentifier {
        number: SectionNumber,
        earlier_title: String,
        kept_title: String,
    },
    /// Prefix missing from the section map; record routed to the fallback sheet.
    UnmappedSection { prefix: u32, number: SectionNumber },
}

impl Anomaly {
    pub fn severity(&self) -> Severity {
        match self {
            Anomaly::UnmappedSection { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    pub fn number(&self) -> &SectionNumber {
        match self {
            Anomaly::FieldExtraction { number, .. }
            | Anomaly::DuplicateIdentifier { number, .. }
            | Anomaly::UnmappedSection { number, .. } => number,
        }
    }

    /// One-line description for terminal summaries.
    pub fn describe(&self) -> String {
        match self {
            Anomaly::FieldExtraction { number, line } => {
                format!("{number}: skipped, no title could be derived (line {line})")
            }
            Anomaly::DuplicateIdentifier {
                number,
                earlier_title,
                kept_title,
            } => format!(
                "{number}: duplicate identifier, kept \"{kept_title}\", dropped earlier \"{earlier_title}\""
            ),
            Anomaly::UnmappedSection { prefix, number } => {
                format!("{number}: prefix {prefix} has no section mapping, placed in fallback sheet")
            }
        }
    }
}

/// Counters and anomalies for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Blocks produced by the segmenter.
    pub candidates: usize,
    /// Blocks rejected as structural headers.
    pub headers_dropped: usize,
    /// Records that reached a sheet.
    pub accepted: usize,
    pub anomalies: Vec<Anomaly>,
}

impl RunReport {
    pub fn record(&mut self, anomaly: Anomaly) {
        self.anomalies.push(anomaly);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Anomaly> {
        self.anomalies
            .iter()
            .filter(|a| a.severity() == Severity::Warning)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_is_informational() {
        let mut report = RunReport::default();
        report.record(Anomaly::UnmappedSection {
            prefix: 9,
            number: "9.1".parse().unwrap(),
        });
        report.record(Anomaly::FieldExtraction {
            number: "1.1".parse().unwrap(),
            line: 3,
        });
        assert_eq!(report.warning_count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn anomaly_serializes_with_kind_tag() {
        let anomaly = Anomaly::UnmappedSection {
            prefix: 9,
            number: "9.1".parse().unwrap(),
        };
        let json = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(json["kind"], "unmapped_section");
        assert_eq!(json["number"], "9.1");
    }
}
