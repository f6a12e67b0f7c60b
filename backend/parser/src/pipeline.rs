//! Segment → classify → filter → deduplicate → attribute.

use std::collections::BTreeMap;

use benchforge_core::{
    Anomaly, ConvertError, Recommendation, RunReport, SectionMap, SectionNumber, Sheet,
};
use tracing::{debug, info, warn};

use crate::attribution::SectionAttributor;
use crate::fields::classify;
use crate::filter::{evaluate, Verdict};
use crate::segmenter::Segmenter;
use crate::text::join_pages;

/// Accepted records in identifier order plus the anomalies met on the way.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub recommendations: Vec<Recommendation>,
    pub report: RunReport,
}

impl Extraction {
    /// Group the records into sheets using `map`.
    pub fn into_sheets(self, map: &SectionMap) -> (Vec<Sheet>, RunReport) {
        let mut report = self.report;
        let sheets = build_sheets(self.recommendations, map, &mut report);
        (sheets, report)
    }
}

/// Parse pages from `start_page` (1-based) onward.
pub fn extract_from_pages(pages: &[String], start_page: usize) -> Result<Extraction, ConvertError> {
    let text = join_pages(pages, start_page)?;
    extract(&text, start_page.max(1))
}

/// Parse an already-joined text stream.
pub fn extract_from_text(text: &str) -> Result<Extraction, ConvertError> {
    extract(text, 1)
}

fn extract(text: &str, start_page: usize) -> Result<Extraction, ConvertError> {
    let mut report = RunReport::default();
    let mut accepted: BTreeMap<SectionNumber, Recommendation> = BTreeMap::new();

    for block in Segmenter::new(text) {
        report.candidates += 1;

        let candidate = match classify(block) {
            Ok(candidate) => candidate,
            Err(err) => {
                warn!(number = %err.number, line = err.line, "Skipping block without a title");
                report.record(Anomaly::FieldExtraction {
                    number: err.number,
                    line: err.line,
                });
                continue;
            }
        };

        if evaluate(&candidate) == Verdict::RejectHeader {
            debug!(number = %candidate.number, title = %candidate.title, "Dropping header block");
            report.headers_dropped += 1;
            continue;
        }

        let number = candidate.number.clone();
        if let Some(earlier) = accepted.insert(number.clone(), candidate) {
            let kept_title = accepted[&number].title.clone();
            warn!(%number, earlier = %earlier.title, kept = %kept_title, "Duplicate identifier; keeping the later block");
            report.record(Anomaly::DuplicateIdentifier {
                number,
                earlier_title: earlier.title,
                kept_title,
            });
        }
    }

    if report.candidates == 0 {
        return Err(ConvertError::NoAnchorsFound { start_page });
    }

    report.accepted = accepted.len();
    info!(
        candidates = report.candidates,
        accepted = report.accepted,
        headers = report.headers_dropped,
        "Extracted recommendations"
    );

    Ok(Extraction {
        recommendations: accepted.into_values().collect(),
        report,
    })
}

/// Attribute records to sheets, in map order with the fallback sheet last.
pub fn build_sheets(
    recommendations: Vec<Recommendation>,
    map: &SectionMap,
    report: &mut RunReport,
) -> Vec<Sheet> {
    let mut attributor = SectionAttributor::new(map);
    for rec in recommendations {
        attributor.assign(rec, report);
    }
    attributor.finish()
}
